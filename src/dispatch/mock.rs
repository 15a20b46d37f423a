//! Mock dispatcher for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{DispatchError, Dispatcher, Job};

/// A dispatcher that holds jobs until the test runs them.
///
/// Clones share the same queue, so a test can keep one clone while the
/// engine owns another. Calling [`MockDispatcher::close`] makes every
/// further dispatch fail, simulating a UI that has gone away.
#[derive(Clone, Default)]
pub struct MockDispatcher {
    jobs: Arc<Mutex<Vec<Job>>>,
    closed: Arc<AtomicBool>,
    dispatched: Arc<AtomicUsize>,
}

impl MockDispatcher {
    /// Creates an open mock dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every subsequent dispatch.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Returns the number of jobs accepted so far.
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Returns the number of jobs waiting to run.
    pub fn pending(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Runs the queued jobs (including ones they queue) and returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let batch: Vec<Job> = {
                let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *jobs)
            };
            if batch.is_empty() {
                return ran;
            }
            for job in batch {
                job();
                ran += 1;
            }
        }
    }
}

impl Dispatcher for MockDispatcher {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DispatchError::Closed);
        }
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(job);
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
