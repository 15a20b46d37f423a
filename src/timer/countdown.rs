//! Countdown state machine.
//!
//! Pure bookkeeping with no threads or clocks: the engine owns one
//! `CountdownState` behind a mutex and feeds it operations and periodic
//! ticks. Every value the state can hold is non-negative, and the only path
//! that reports a completion is [`CountdownState::tick`] decrementing a
//! running, non-zero countdown to zero.
//!
//! Every operation also advances a run counter, so a completion reported
//! for one run can be recognised as stale once the countdown has been
//! driven again.

use crate::types::{TimerSnapshot, TimerStatus};

/// What a periodic tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    /// Decremented to the contained value, still running.
    Ticked(u32),
    /// Decremented to zero; the countdown finished naturally.
    Completed,
    /// Running at zero after a manual adjustment; stopped without completing.
    Drained,
}

/// The countdown value and its running flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownState {
    remaining_seconds: u32,
    initial_seconds: u32,
    running: bool,
    /// Advanced by every operation; ticks leave it alone
    run: u64,
}

impl CountdownState {
    /// Creates an idle countdown at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or replaces) a countdown.
    ///
    /// Non-positive values abort to an idle zero instead of starting.
    /// Returns the value to publish.
    pub fn start(&mut self, seconds: i64) -> u32 {
        self.advance_run();
        if seconds <= 0 {
            self.remaining_seconds = 0;
            self.running = false;
            return self.remaining_seconds;
        }

        let seconds = saturate(seconds);
        self.initial_seconds = seconds;
        self.remaining_seconds = seconds;
        self.running = true;
        self.remaining_seconds
    }

    /// Freezes the countdown at its current value.
    pub fn pause(&mut self) {
        self.advance_run();
        self.running = false;
    }

    /// Stops and restores the value last passed to `start`.
    ///
    /// Returns the value to publish.
    pub fn reset(&mut self) -> u32 {
        self.advance_run();
        self.running = false;
        self.remaining_seconds = self.initial_seconds;
        self.remaining_seconds
    }

    /// Adds `delta` seconds (negative allowed), flooring at zero.
    ///
    /// Leaves the running flag alone. Returns the value to publish.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        self.advance_run();
        let adjusted = i64::from(self.remaining_seconds).saturating_add(delta);
        self.remaining_seconds = saturate(adjusted);
        self.remaining_seconds
    }

    /// Applies one periodic tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        if self.remaining_seconds == 0 {
            self.running = false;
            return TickOutcome::Drained;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Ticked(self.remaining_seconds)
        }
    }

    /// Halts the countdown for good; the value is kept for inspection.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Returns the seconds left.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns the value `reset` restores.
    pub fn initial_seconds(&self) -> u32 {
        self.initial_seconds
    }

    /// Returns the run counter.
    pub fn run(&self) -> u64 {
        self.run
    }

    /// Returns true if ticks decrement the countdown.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Takes a snapshot, reporting `Stopped` when the owner is terminated.
    pub fn snapshot(&self, terminated: bool) -> TimerSnapshot {
        let status = if terminated {
            TimerStatus::Stopped
        } else if self.running {
            TimerStatus::Running
        } else {
            TimerStatus::Idle
        };

        TimerSnapshot {
            status,
            remaining_seconds: self.remaining_seconds,
            initial_seconds: self.initial_seconds,
        }
    }

    fn advance_run(&mut self) {
        self.run = self.run.wrapping_add(1);
    }
}

/// Clamps a signed second count into `0..=u32::MAX`.
fn saturate(seconds: i64) -> u32 {
    u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
}
