//! Countdown engine.
//!
//! This module provides the long-lived countdown timer:
//! - A ticker task on a tokio runtime that fires once per second
//! - One mutex guarding the countdown value, its initial value and the running flag
//! - Tick and completion sinks delivered through a [`Dispatcher`], never on the ticker
//! - Terminal `stop()` that aborts the ticker and silences queued notifications

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::dispatch::{Dispatcher, Job};
use crate::types::TimerSnapshot;

use super::countdown::{CountdownState, TickOutcome};
use super::error::TimerError;

/// Cadence of the periodic tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

type TickSink = Box<dyn Fn(u32) + Send + Sync>;
type FinishSink = Box<dyn Fn(&TimerControl) + Send + Sync>;

// ============================================================================
// Shared state
// ============================================================================

struct Shared {
    /// Countdown guarded as one unit
    state: Mutex<CountdownState>,
    /// Cleared exactly once by `stop()`
    live: AtomicBool,
    /// Route to the UI context
    dispatcher: Box<dyn Dispatcher>,
    on_tick: TickSink,
    on_finish: FinishSink,
}

// ============================================================================
// TimerControl
// ============================================================================

/// Cloneable handle for driving a countdown.
///
/// Completion sinks receive one of these so a host can chain into another
/// countdown (work → rest). It cannot stop the timer; only the owning
/// [`CountdownTimer`] can. Every operation returns immediately and is a
/// silent no-op once the timer has been stopped.
#[derive(Clone)]
pub struct TimerControl {
    shared: Arc<Shared>,
}

impl TimerControl {
    /// Starts or replaces the countdown and publishes the new value.
    ///
    /// `seconds <= 0` aborts to an idle zero; it is not a completion.
    pub fn start(&self, seconds: i64) {
        let mut state = self.lock_state();
        if !self.is_live() {
            return;
        }

        let value = state.start(seconds);
        debug!(seconds, running = state.is_running(), "countdown started");
        self.emit_tick(value);
    }

    /// Freezes the countdown at its current value.
    pub fn pause(&self) {
        let mut state = self.lock_state();
        if !self.is_live() {
            return;
        }

        state.pause();
        debug!(remaining = state.remaining_seconds(), "countdown paused");
    }

    /// Stops and restores the last started value, then publishes it.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        if !self.is_live() {
            return;
        }

        let value = state.reset();
        debug!(remaining = value, "countdown reset");
        self.emit_tick(value);
    }

    /// Adds `delta` seconds (negative allowed, floored at zero) and publishes the result.
    ///
    /// Reaching zero this way never counts as a completion.
    pub fn adjust(&self, delta: i64) {
        let mut state = self.lock_state();
        if !self.is_live() {
            return;
        }

        let value = state.adjust(delta);
        debug!(delta, remaining = value, "countdown adjusted");
        self.emit_tick(value);
    }

    /// Returns a consistent copy of the countdown.
    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.lock_state();
        state.snapshot(!self.is_live())
    }

    /// Returns true once the owning timer has been stopped.
    pub fn is_stopped(&self) -> bool {
        !self.is_live()
    }

    /// Runs one periodic tick. Returns false once the timer is stopped.
    fn tick(&self) -> bool {
        let mut state = self.lock_state();
        if !self.is_live() {
            return false;
        }

        match state.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Ticked(value) => self.emit_tick(value),
            TickOutcome::Drained => {
                debug!("countdown drained after manual adjustment");
                self.emit_tick(0);
            }
            TickOutcome::Completed => {
                info!(initial = state.initial_seconds(), "countdown completed");
                self.emit_tick(0);
                self.emit_finish(state.run());
            }
        }
        true
    }

    /// Queues the tick sink. Must be called with the state lock held so
    /// values reach the UI in mutation order.
    fn emit_tick(&self, seconds: u32) {
        let shared = Arc::downgrade(&self.shared);
        self.post(Box::new(move || {
            if let Some(control) = upgrade_live(&shared) {
                (control.shared.on_tick)(seconds);
            }
        }));
    }

    /// Queues the completion sink for `run`.
    ///
    /// The job is skipped if any operation drove the countdown between the
    /// completing tick and the job running.
    fn emit_finish(&self, run: u64) {
        let shared = Arc::downgrade(&self.shared);
        self.post(Box::new(move || {
            let Some(control) = upgrade_live(&shared) else {
                return;
            };
            if !control.is_current_run(run) {
                debug!(run, "skipping superseded completion");
                return;
            }
            (control.shared.on_finish)(&control);
        }));
    }

    fn is_current_run(&self, run: u64) -> bool {
        self.lock_state().run() == run
    }

    fn post(&self, job: Job) {
        if let Err(e) = self.shared.dispatcher.dispatch(job) {
            warn!(error = %e, "dropping countdown notification");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CountdownState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn is_live(&self) -> bool {
        self.shared.live.load(Ordering::Acquire)
    }
}

/// Resolves a queued job's handle, skipping it if the timer is gone or stopped.
fn upgrade_live(shared: &Weak<Shared>) -> Option<TimerControl> {
    let shared = shared.upgrade()?;
    if !shared.live.load(Ordering::Acquire) {
        return None;
    }
    Some(TimerControl { shared })
}

// ============================================================================
// CountdownTimer
// ============================================================================

/// Owner of a countdown and its ticker task.
///
/// Construction publishes an initial tick of `0` and starts ticking at a
/// fixed one-second cadence. [`CountdownTimer::stop`] (also run on drop)
/// terminates the ticker for good.
pub struct CountdownTimer {
    control: TimerControl,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl CountdownTimer {
    /// Creates a timer whose ticker runs on the given runtime.
    ///
    /// `on_tick` and `on_finish` are only ever invoked from jobs handed to
    /// `dispatcher`, i.e. on the UI context.
    ///
    /// # Panics
    ///
    /// Panics if `runtime` was built without the time driver. Runtimes from
    /// [`TickerRuntime`](super::TickerRuntime) always have it.
    pub fn new<D, T, F>(runtime: &Handle, dispatcher: D, on_tick: T, on_finish: F) -> Self
    where
        D: Dispatcher,
        T: Fn(u32) + Send + Sync + 'static,
        F: Fn(&TimerControl) + Send + Sync + 'static,
    {
        let control = TimerControl {
            shared: Arc::new(Shared {
                state: Mutex::new(CountdownState::new()),
                live: AtomicBool::new(true),
                dispatcher: Box::new(dispatcher),
                on_tick: Box::new(on_tick),
                on_finish: Box::new(on_finish),
            }),
        };

        {
            let _state = control.lock_state();
            control.emit_tick(0);
        }

        let ticker = {
            let _guard = runtime.enter();
            let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            // Fixed rate: a late tick is followed by catch-up ticks.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            ticker
        };
        let handle = runtime.spawn(run_ticker(control.clone(), ticker));
        debug!("countdown ticker spawned");

        Self {
            control,
            ticker: Mutex::new(Some(handle)),
        }
    }

    /// Creates a timer on the tokio runtime of the calling thread.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NoRuntime` when called outside a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if the current runtime was built without the time driver.
    pub fn spawn<D, T, F>(dispatcher: D, on_tick: T, on_finish: F) -> Result<Self, TimerError>
    where
        D: Dispatcher,
        T: Fn(u32) + Send + Sync + 'static,
        F: Fn(&TimerControl) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        Ok(Self::new(&runtime, dispatcher, on_tick, on_finish))
    }

    /// Returns a cloneable handle for driving the countdown.
    pub fn control(&self) -> TimerControl {
        self.control.clone()
    }

    /// See [`TimerControl::start`].
    pub fn start(&self, seconds: i64) {
        self.control.start(seconds);
    }

    /// See [`TimerControl::pause`].
    pub fn pause(&self) {
        self.control.pause();
    }

    /// See [`TimerControl::reset`].
    pub fn reset(&self) {
        self.control.reset();
    }

    /// See [`TimerControl::adjust`].
    pub fn adjust(&self, delta: i64) {
        self.control.adjust(delta);
    }

    /// See [`TimerControl::snapshot`].
    pub fn snapshot(&self) -> TimerSnapshot {
        self.control.snapshot()
    }

    /// Returns true once `stop()` has run.
    pub fn is_stopped(&self) -> bool {
        self.control.is_stopped()
    }

    /// Terminates the ticker permanently.
    ///
    /// After this returns no tick is applied and no sink runs, including
    /// jobs already queued on the UI context. Safe to call repeatedly and
    /// while a tick is in flight.
    pub fn stop(&self) {
        {
            let mut state = self.control.lock_state();
            if !self.control.shared.live.swap(false, Ordering::AcqRel) {
                return;
            }
            state.halt();
        }

        let ticker = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(ticker) = ticker {
            ticker.abort();
        }
        info!("countdown timer stopped");
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ticker loop; exits on its own once the timer is stopped.
async fn run_ticker(control: TimerControl, mut ticker: Interval) {
    loop {
        ticker.tick().await;

        if !control.tick() {
            debug!("countdown ticker exiting");
            break;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MockDispatcher;
    use crate::types::TimerStatus;

    /// Records every sink invocation in order.
    #[derive(Clone, Default)]
    struct Recorder {
        ticks: Arc<Mutex<Vec<u32>>>,
        finishes: Arc<Mutex<usize>>,
    }

    impl Recorder {
        fn ticks(&self) -> Vec<u32> {
            self.ticks.lock().unwrap().clone()
        }

        fn finishes(&self) -> usize {
            *self.finishes.lock().unwrap()
        }
    }

    fn create_timer() -> (CountdownTimer, MockDispatcher, Recorder) {
        let dispatcher = MockDispatcher::new();
        let recorder = Recorder::default();
        let ticks = recorder.clone();
        let finishes = recorder.clone();
        let timer = CountdownTimer::spawn(
            dispatcher.clone(),
            move |seconds| ticks.ticks.lock().unwrap().push(seconds),
            move |_control| *finishes.finishes.lock().unwrap() += 1,
        )
        .unwrap();
        (timer, dispatcher, recorder)
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_spawn_outside_runtime_fails() {
            let result = CountdownTimer::spawn(MockDispatcher::new(), |_| {}, |_| {});
            assert!(matches!(result, Err(TimerError::NoRuntime)));
        }

        #[test]
        #[should_panic]
        fn test_runtime_without_time_driver_panics() {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let _timer =
                CountdownTimer::new(runtime.handle(), MockDispatcher::new(), |_| {}, |_| {});
        }

        #[tokio::test(start_paused = true)]
        async fn test_initial_zero_tick_is_dispatched_not_run() {
            let (timer, dispatcher, recorder) = create_timer();

            assert_eq!(dispatcher.pending(), 1);
            assert!(recorder.ticks().is_empty());

            dispatcher.run_pending();
            assert_eq!(recorder.ticks(), vec![0]);
            assert_eq!(timer.snapshot().status, TimerStatus::Idle);
        }
    }

    mod operation_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_start_publishes_immediately() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(30);
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 30]);
            assert!(timer.snapshot().is_running());
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_does_not_publish() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(30);
            timer.pause();
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 30]);
            assert_eq!(timer.snapshot().status, TimerStatus::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_control_handle_drives_same_countdown() {
            let (timer, dispatcher, recorder) = create_timer();
            let control = timer.control();

            control.start(12);
            control.adjust(3);
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 12, 15]);
            assert_eq!(timer.snapshot().remaining_seconds, 15);
        }
    }

    mod ticker_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_ticks_once_per_second() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(5);
            tokio::time::sleep(Duration::from_millis(3500)).await;
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 5, 4, 3, 2]);
            assert_eq!(timer.snapshot().remaining_seconds, 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_completion_dispatched_once() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(2);
            tokio::time::sleep(Duration::from_millis(4500)).await;
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 2, 1, 0]);
            assert_eq!(recorder.finishes(), 1);
            assert_eq!(timer.snapshot().status, TimerStatus::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_completion_skipped_after_restart() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(2);
            tokio::time::sleep(Duration::from_millis(2500)).await;
            // The completion is queued but has not run yet.
            timer.start(5);
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 2, 1, 0, 5]);
            assert_eq!(recorder.finishes(), 0);
            assert!(timer.snapshot().is_running());
        }

        #[tokio::test(start_paused = true)]
        async fn test_completion_skipped_after_reset() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(2);
            tokio::time::sleep(Duration::from_millis(2500)).await;
            timer.reset();
            dispatcher.run_pending();

            assert_eq!(recorder.ticks(), vec![0, 2, 1, 0, 2]);
            assert_eq!(recorder.finishes(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_ticker_survives_closed_dispatcher() {
            let (timer, dispatcher, _recorder) = create_timer();

            timer.start(5);
            dispatcher.close();
            tokio::time::sleep(Duration::from_millis(2500)).await;

            assert_eq!(timer.snapshot().remaining_seconds, 3);
        }
    }

    mod stop_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_stop_silences_queued_jobs() {
            let (timer, dispatcher, recorder) = create_timer();

            timer.start(10);
            timer.stop();
            dispatcher.run_pending();

            assert!(recorder.ticks().is_empty());
            assert!(timer.is_stopped());
            assert_eq!(timer.snapshot().status, TimerStatus::Stopped);
        }

        #[tokio::test(start_paused = true)]
        async fn test_operations_after_stop_are_noops() {
            let (timer, dispatcher, recorder) = create_timer();
            dispatcher.run_pending();

            timer.stop();
            let before = dispatcher.dispatched_count();
            timer.start(10);
            timer.adjust(5);
            timer.reset();
            timer.pause();

            assert_eq!(dispatcher.dispatched_count(), before);
            assert_eq!(recorder.ticks(), vec![0]);
            assert_eq!(timer.snapshot().remaining_seconds, 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stop_is_idempotent() {
            let (timer, _dispatcher, _recorder) = create_timer();
            timer.stop();
            timer.stop();
            assert!(timer.is_stopped());
        }

        #[tokio::test(start_paused = true)]
        async fn test_drop_stops_control_handles() {
            let (timer, _dispatcher, _recorder) = create_timer();
            let control = timer.control();

            drop(timer);
            assert!(control.is_stopped());
            control.start(10);
            assert_eq!(control.snapshot().remaining_seconds, 0);
        }
    }
}
