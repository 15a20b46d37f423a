//! Command definitions for the workout timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{TimerConfig, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Workout Timer - work/rest countdowns in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "workout-timer",
    version,
    about = "Work/rest countdown timer for workouts",
    long_about = "An interactive countdown timer for workout intervals.\n\
                  Type commands (start, pause, reset, +, -) while the clock runs.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file (default: ~/.workout-timer/config.json)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive timer
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command.
///
/// Every flag is optional; unset flags keep the value from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work duration in seconds (5-3600)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_DURATION_SECONDS)..=i64::from(MAX_DURATION_SECONDS))
    )]
    pub work: Option<u32>,

    /// Rest duration in seconds (5-3600)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_DURATION_SECONDS)..=i64::from(MAX_DURATION_SECONDS))
    )]
    pub rest: Option<u32>,

    /// Automatically start the rest countdown when work finishes
    #[arg(short, long)]
    pub auto_rest: bool,
}

impl RunArgs {
    /// Applies the flags that were given on top of a loaded configuration.
    pub fn apply_to(&self, mut config: TimerConfig) -> TimerConfig {
        if let Some(work) = self.work {
            config.work_seconds = work;
        }
        if let Some(rest) = self.rest {
            config.rest_seconds = rest;
        }
        if self.auto_rest {
            config.auto_rest = true;
        }
        config
    }
}

// ============================================================================
// Tests
// ============================================================================
