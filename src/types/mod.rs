//! Core data types for the workout timer.
//!
//! This module defines the data structures used for:
//! - Observing the countdown state from outside the engine
//! - Tracking which part of a work/rest cycle is active

// ============================================================================
// TimerStatus
// ============================================================================

/// Represents the observable status of a countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Not counting down (never started, paused, reset or finished)
    Idle,
    /// Ticks are decrementing the countdown
    Running,
    /// The ticking context has been terminated for good
    Stopped,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Stopped => "stopped",
        }
    }
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

// ============================================================================
// WorkoutPhase
// ============================================================================

/// The part of a work/rest cycle the workout pane is timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutPhase {
    /// Timing a work interval
    Work,
    /// Timing a rest interval
    Rest,
}

impl WorkoutPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutPhase::Work => "work",
            WorkoutPhase::Rest => "rest",
        }
    }
}

impl Default for WorkoutPhase {
    fn default() -> Self {
        WorkoutPhase::Work
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// A consistent copy of the countdown state taken under the engine lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSnapshot {
    /// Current status
    pub status: TimerStatus,
    /// Seconds left on the countdown
    pub remaining_seconds: u32,
    /// Value last passed to `start`, restored by `reset`
    pub initial_seconds: u32,
}

impl TimerSnapshot {
    /// Returns true if the countdown is actively ticking.
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Returns true if the timer has been stopped permanently.
    pub fn is_stopped(&self) -> bool {
        self.status == TimerStatus::Stopped
    }
}

// ============================================================================
// Tests
// ============================================================================
