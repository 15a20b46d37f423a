//! Display utilities for the workout timer.
//!
//! This module provides formatted terminal output for:
//! - The running clock
//! - Completion notices
//! - Status and help
//! - Error messages

use std::io::Write;

use crate::config::TimerConfig;
use crate::types::{TimerSnapshot, WorkoutPhase};

/// Formats seconds as a zero-padded `mm:ss` clock.
///
/// Minutes are not wrapped into hours, so an hour reads `60:00`.
pub fn format_clock(total_seconds: u32) -> String {
    let (minutes, seconds) = Display::format_time(total_seconds);
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for terminal output.
pub struct Display;

impl Display {
    /// Redraws the clock line in place.
    pub fn show_clock(text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r  {}  ", text);
        let _ = stdout.flush();
    }

    /// Announces a finished countdown.
    pub fn show_finished(phase: WorkoutPhase, next: Option<(WorkoutPhase, u32)>) {
        println!();
        match phase {
            WorkoutPhase::Work => println!("* Work interval finished"),
            WorkoutPhase::Rest => println!("* Rest interval finished"),
        }
        if let Some((next_phase, seconds)) = next {
            println!("  Starting {} ({})", next_phase.as_str(), format_clock(seconds));
        }
    }

    /// Shows the pane settings when the timer opens.
    pub fn show_banner(config: &TimerConfig) {
        println!("Workout Timer");
        println!("─────────────────────────────");
        println!("Work: {}", format_clock(config.work_seconds));
        println!("Rest: {}", format_clock(config.rest_seconds));
        println!(
            "Auto rest: {}",
            if config.auto_rest { "on" } else { "off" }
        );
    }

    /// Shows the current countdown and settings.
    pub fn show_status(snapshot: &TimerSnapshot, phase: WorkoutPhase, config: &TimerConfig) {
        println!();
        println!("Status: {}", snapshot.status.as_str());
        println!("Phase: {}", phase.as_str());
        println!("Remaining: {}", format_clock(snapshot.remaining_seconds));
        println!("Started from: {}", format_clock(snapshot.initial_seconds));
        println!(
            "Work {} / Rest {} / Auto rest {}",
            format_clock(config.work_seconds),
            format_clock(config.rest_seconds),
            if config.auto_rest { "on" } else { "off" }
        );
    }

    /// Lists the interactive commands.
    pub fn show_help(adjust_step_seconds: u32) {
        println!();
        println!("Commands:");
        println!("  start          start the work countdown");
        println!("  pause          freeze the countdown");
        println!("  reset          go back to the last start value");
        println!("  + / -          add or remove {}s", adjust_step_seconds);
        println!("  work <secs>    set the work duration");
        println!("  rest <secs>    set the rest duration");
        println!("  auto on|off    chain rest after work");
        println!("  status         show the current state");
        println!("  quit           close the timer");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Splits seconds into (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
