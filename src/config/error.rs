//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating the timer configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{0}': {1}")]
    Read(String, String),

    /// The configuration file is not valid JSON for `TimerConfig`.
    #[error("failed to parse config file '{0}': {1}")]
    Parse(String, String),

    /// A duration setting is outside the accepted range.
    #[error("{field} must be between {min} and {max} seconds (got {value})")]
    OutOfRange {
        /// Name of the offending setting
        field: &'static str,
        /// Value that was rejected
        value: u32,
        /// Inclusive lower bound
        min: u32,
        /// Inclusive upper bound
        max: u32,
    },
}

impl ConfigError {
    /// Returns true if the error came from the filesystem rather than the content.
    #[must_use]
    pub fn is_read_error(&self) -> bool {
        matches!(self, Self::Read(_, _))
    }
}
