//! Countdown timer module.
//!
//! This module contains the countdown core:
//! - `countdown`: Pure countdown state machine
//! - `engine`: Ticker task, locking and sink delivery
//! - `runtime`: Dedicated thread hosting the ticker
//! - `error`: Construction errors

pub mod countdown;
pub mod engine;
pub mod error;
pub mod runtime;

pub use countdown::{CountdownState, TickOutcome};
pub use engine::{CountdownTimer, TimerControl, TICK_PERIOD};
pub use error::TimerError;
pub use runtime::TickerRuntime;
