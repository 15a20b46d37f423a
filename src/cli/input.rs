//! Interactive command parsing.
//!
//! Each line typed into the pane maps to one [`PaneCommand`].

use std::str::FromStr;

use thiserror::Error;

/// A command typed into the workout pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneCommand {
    /// Start the work countdown
    Start,
    /// Freeze the countdown
    Pause,
    /// Restore the last start value
    Reset,
    /// Add one adjustment step
    Add,
    /// Remove one adjustment step
    Subtract,
    /// Set the work duration in seconds
    SetWork(i64),
    /// Set the rest duration in seconds
    SetRest(i64),
    /// Switch auto rest on or off
    AutoRest(bool),
    /// Show the current state
    Status,
    /// List the commands
    Help,
    /// Close the pane
    Quit,
}

/// Errors from parsing a typed command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Unrecognised command word.
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    /// A command that needs an argument was given none.
    #[error("'{0}' needs a value")]
    MissingValue(&'static str),

    /// The argument could not be parsed.
    #[error("invalid value '{1}' for '{0}'")]
    InvalidValue(&'static str, String),
}

impl FromStr for PaneCommand {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("").to_ascii_lowercase();
        let value = words.next();

        match command.as_str() {
            "start" | "s" => Ok(PaneCommand::Start),
            "pause" | "p" => Ok(PaneCommand::Pause),
            "reset" | "r" => Ok(PaneCommand::Reset),
            "+" | "plus" => Ok(PaneCommand::Add),
            "-" | "minus" => Ok(PaneCommand::Subtract),
            "work" => parse_seconds("work", value).map(PaneCommand::SetWork),
            "rest" => parse_seconds("rest", value).map(PaneCommand::SetRest),
            "auto" => match value.map(str::to_ascii_lowercase).as_deref() {
                Some("on") => Ok(PaneCommand::AutoRest(true)),
                Some("off") => Ok(PaneCommand::AutoRest(false)),
                Some(other) => Err(InputError::InvalidValue("auto", other.to_string())),
                None => Err(InputError::MissingValue("auto")),
            },
            "status" => Ok(PaneCommand::Status),
            "help" | "?" | "" => Ok(PaneCommand::Help),
            "quit" | "q" | "exit" => Ok(PaneCommand::Quit),
            other => Err(InputError::Unknown(other.to_string())),
        }
    }
}

fn parse_seconds(command: &'static str, value: Option<&str>) -> Result<i64, InputError> {
    let value = value.ok_or(InputError::MissingValue(command))?;
    value
        .parse::<i64>()
        .map_err(|_| InputError::InvalidValue(command, value.to_string()))
}
