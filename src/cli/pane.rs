//! Workout pane.
//!
//! Owns the countdown timer and plays two roles around it:
//! - Display sink: renders every tick as an `mm:ss` clock label
//! - Policy host: on completion of a work interval, optionally chains
//!   straight into the rest interval
//!
//! The pane's methods and the timer sinks all run on the UI thread.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::config::TimerConfig;
use crate::dispatch::Dispatcher;
use crate::timer::{CountdownTimer, TimerControl};
use crate::types::{TimerSnapshot, WorkoutPhase};

use super::display::{format_clock, Display};
use super::input::PaneCommand;

// ============================================================================
// ClockLabel
// ============================================================================

/// The clock readout, shared between the pane and its tick sink.
#[derive(Debug, Clone)]
pub struct ClockLabel {
    text: Arc<Mutex<String>>,
}

impl ClockLabel {
    /// Creates a label reading `00:00`.
    pub fn new() -> Self {
        Self {
            text: Arc::new(Mutex::new(format_clock(0))),
        }
    }

    /// Replaces the label text.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    /// Returns the label text.
    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ClockLabel {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TimerPane
// ============================================================================

/// Settings and phase read by the completion policy.
#[derive(Debug)]
struct PaneState {
    config: TimerConfig,
    phase: WorkoutPhase,
}

/// Interactive work/rest timer pane.
pub struct TimerPane {
    timer: CountdownTimer,
    state: Arc<Mutex<PaneState>>,
    clock: ClockLabel,
}

impl TimerPane {
    /// Creates the pane and its timer.
    ///
    /// The timer ticks on `runtime`; its sinks are delivered via `dispatcher`.
    pub fn new<D: Dispatcher>(config: TimerConfig, runtime: &Handle, dispatcher: D) -> Self {
        let clock = ClockLabel::new();
        let state = Arc::new(Mutex::new(PaneState {
            config,
            phase: WorkoutPhase::Work,
        }));

        let label = clock.clone();
        let on_tick = move |seconds: u32| {
            let text = format_clock(seconds);
            Display::show_clock(&text);
            label.set_text(text);
        };

        let policy = Arc::clone(&state);
        let on_finish = move |control: &TimerControl| handle_finish(&policy, control);

        let timer = CountdownTimer::new(runtime, dispatcher, on_tick, on_finish);

        Self {
            timer,
            state,
            clock,
        }
    }

    /// Applies a typed command. Returns false when the pane should close.
    pub fn handle(&self, command: PaneCommand) -> bool {
        debug!(?command, "pane command");
        match command {
            PaneCommand::Start => self.start(),
            PaneCommand::Pause => self.timer.pause(),
            PaneCommand::Reset => self.timer.reset(),
            PaneCommand::Add => self.timer.adjust(i64::from(self.adjust_step())),
            PaneCommand::Subtract => self.timer.adjust(-i64::from(self.adjust_step())),
            PaneCommand::SetWork(seconds) => {
                self.lock_state().config.work_seconds = TimerConfig::clamp_duration(seconds);
            }
            PaneCommand::SetRest(seconds) => {
                self.lock_state().config.rest_seconds = TimerConfig::clamp_duration(seconds);
            }
            PaneCommand::AutoRest(enabled) => self.lock_state().config.auto_rest = enabled,
            PaneCommand::Status => {
                let state = self.lock_state();
                Display::show_status(&self.timer.snapshot(), state.phase, &state.config);
            }
            PaneCommand::Help => Display::show_help(self.adjust_step()),
            PaneCommand::Quit => return false,
        }
        true
    }

    /// Starts a work interval from the configured work duration.
    pub fn start(&self) {
        let work_seconds = {
            let mut state = self.lock_state();
            state.phase = WorkoutPhase::Work;
            state.config.work_seconds
        };
        self.timer.start(i64::from(work_seconds));
    }

    /// Returns the clock readout.
    pub fn clock_text(&self) -> String {
        self.clock.text()
    }

    /// Returns the interval currently being timed.
    pub fn phase(&self) -> WorkoutPhase {
        self.lock_state().phase
    }

    /// Returns a copy of the current settings.
    pub fn config(&self) -> TimerConfig {
        self.lock_state().config.clone()
    }

    /// Returns a snapshot of the countdown.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Returns the underlying timer.
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// Stops the timer for good. Call once when the pane closes.
    pub fn shutdown(&self) {
        self.timer.stop();
    }

    fn adjust_step(&self) -> u32 {
        self.lock_state().config.adjust_step_seconds
    }

    fn lock_state(&self) -> MutexGuard<'_, PaneState> {
        lock_pane(&self.state)
    }
}

fn lock_pane(state: &Mutex<PaneState>) -> MutexGuard<'_, PaneState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Completion policy: work may chain into rest; rest never chains.
fn handle_finish(state: &Mutex<PaneState>, control: &TimerControl) {
    let mut state = lock_pane(state);
    match state.phase {
        WorkoutPhase::Work if state.config.auto_rest => {
            let rest_seconds = state.config.rest_seconds;
            state.phase = WorkoutPhase::Rest;
            info!(rest_seconds, "work finished, starting rest");
            Display::show_finished(WorkoutPhase::Work, Some((WorkoutPhase::Rest, rest_seconds)));
            control.start(i64::from(rest_seconds));
        }
        WorkoutPhase::Work => {
            info!("work finished");
            Display::show_finished(WorkoutPhase::Work, None);
        }
        WorkoutPhase::Rest => {
            state.phase = WorkoutPhase::Work;
            info!("rest finished");
            Display::show_finished(WorkoutPhase::Rest, None);
        }
    }
}
