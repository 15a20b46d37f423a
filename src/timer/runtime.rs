//! Dedicated ticker runtime.
//!
//! Hosts a current-thread tokio runtime on its own OS thread so the
//! countdown keeps its cadence no matter what the UI thread is doing.

use std::thread::JoinHandle;

use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::error::TimerError;

/// Name given to the ticker thread.
const TICKER_THREAD_NAME: &str = "countdown-ticker";

/// A tokio runtime running on a dedicated thread.
pub struct TickerRuntime {
    handle: Handle,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TickerRuntime {
    /// Builds the runtime and starts its thread.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::Runtime` if the runtime cannot be built and
    /// `TimerError::ThreadSpawn` if the thread cannot be created.
    pub fn start() -> Result<Self, TimerError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TimerError::Runtime(e.to_string()))?;
        let handle = runtime.handle().clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name(TICKER_THREAD_NAME.to_string())
            .spawn(move || {
                runtime.block_on(async {
                    // Resolves on an explicit shutdown or when the sender is dropped.
                    let _ = shutdown_rx.await;
                });
                debug!("ticker runtime finished");
            })
            .map_err(|e| TimerError::ThreadSpawn(e.to_string()))?;

        debug!(thread = TICKER_THREAD_NAME, "ticker runtime started");

        Ok(Self {
            handle,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    /// Returns the handle used to spawn ticker tasks.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Stops the runtime and joins its thread. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for TickerRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_start_and_shutdown() {
        let mut runtime = TickerRuntime::start().unwrap();
        runtime.shutdown();
        runtime.shutdown();
    }

    #[test]
    fn test_tasks_run_on_ticker_thread() {
        let runtime = TickerRuntime::start().unwrap();
        let (tx, rx) = mpsc::channel();

        runtime.handle().spawn(async move {
            let name = std::thread::current().name().map(str::to_string);
            let _ = tx.send(name);
        });

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some(TICKER_THREAD_NAME));
    }
}
