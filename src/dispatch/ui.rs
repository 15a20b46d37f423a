//! Channel-backed UI queue.
//!
//! The sending half can be cloned and moved to any thread. The receiving
//! half stays on the UI thread, which either drains it between frames with
//! [`UiQueue::run_pending`] or waits on [`UiQueue::receiver`] inside a
//! `crossbeam_channel::select!` event loop.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use super::{DispatchError, Dispatcher, Job};

/// Creates a connected dispatcher / queue pair.
pub fn ui_queue() -> (UiDispatcher, UiQueue) {
    let (tx, rx) = unbounded();
    (UiDispatcher { tx }, UiQueue { rx })
}

// ============================================================================
// UiDispatcher
// ============================================================================

/// Sending half of the UI queue.
#[derive(Clone)]
pub struct UiDispatcher {
    tx: Sender<Job>,
}

impl Dispatcher for UiDispatcher {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError> {
        self.tx.send(job).map_err(|_| DispatchError::Closed)
    }
}

// ============================================================================
// UiQueue
// ============================================================================

/// Receiving half of the UI queue, owned by the UI thread.
pub struct UiQueue {
    rx: Receiver<Job>,
}

impl UiQueue {
    /// Runs every job queued so far without blocking.
    ///
    /// Jobs queued by the jobs themselves are run too. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            match self.rx.try_recv() {
                Ok(job) => {
                    job();
                    ran += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("UI queue disconnected");
                    break;
                }
            }
        }
        ran
    }

    /// Returns the underlying receiver for use in a `select!` loop.
    pub fn receiver(&self) -> &Receiver<Job> {
        &self.rx
    }

    /// Returns the number of jobs waiting to run.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns true if no job is waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
