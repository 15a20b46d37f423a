//! Sink delivery onto the UI context.
//!
//! The countdown engine never runs its sinks on the ticking context. It
//! wraps each observation in a [`Job`] and hands it to a [`Dispatcher`],
//! which queues it for the thread that owns the UI:
//!
//! ```
//! use workout_timer::dispatch::{ui_queue, Dispatcher};
//!
//! let (dispatcher, queue) = ui_queue();
//! dispatcher.dispatch(Box::new(|| println!("runs on the UI thread"))).unwrap();
//!
//! // On the UI thread:
//! assert_eq!(queue.run_pending(), 1);
//! ```

mod mock;
mod ui;

pub use mock::MockDispatcher;
pub use ui::{ui_queue, UiDispatcher, UiQueue};

use thiserror::Error;

/// A unit of work to run on the UI context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Errors that can occur when handing a job to the UI context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The UI context no longer accepts jobs.
    #[error("UI context is closed")]
    Closed,
}

/// Posts jobs onto the execution context that owns the UI.
///
/// Implementations must not run the job inline and must not block the caller.
pub trait Dispatcher: Send + Sync + 'static {
    /// Queues a job for the UI context.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Closed` if the UI context is gone.
    fn dispatch(&self, job: Job) -> Result<(), DispatchError>;
}
