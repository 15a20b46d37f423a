//! CLI module for the workout timer.
//!
//! This module provides the terminal interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `input`: Parsing of commands typed while the timer runs
//! - `pane`: The interactive work/rest pane driving the countdown

pub mod commands;
pub mod display;
pub mod input;
pub mod pane;

pub use commands::{Cli, Commands, RunArgs};
pub use display::{format_clock, Display};
pub use input::{InputError, PaneCommand};
pub use pane::{ClockLabel, TimerPane};
