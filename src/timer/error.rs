//! Timer error types.
//!
//! Countdown operations clamp their inputs and never fail; the only errors
//! come from setting up the ticking context.

use thiserror::Error;

/// Errors that can occur while creating the ticking context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// No tokio runtime is available on the calling thread.
    #[error("no tokio runtime is available to drive the countdown ticker")]
    NoRuntime,

    /// The ticker runtime could not be built.
    #[error("failed to build the ticker runtime: {0}")]
    Runtime(String),

    /// The ticker thread could not be spawned.
    #[error("failed to spawn the ticker thread: {0}")]
    ThreadSpawn(String),
}
