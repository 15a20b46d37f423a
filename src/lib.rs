//! Workout Timer Library
//!
//! This library provides the countdown timer behind a work/rest workout
//! pane. It includes:
//! - Countdown engine with a one-second ticker on its own execution context
//! - Sink delivery onto a UI-owned thread
//! - The interactive pane that chains work into rest
//! - Configuration and CLI parsing

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, TimerConfig};
pub use dispatch::{ui_queue, DispatchError, Dispatcher, MockDispatcher, UiDispatcher, UiQueue};
pub use timer::{CountdownTimer, TickerRuntime, TimerControl, TimerError};
pub use types::{TimerSnapshot, TimerStatus, WorkoutPhase};
