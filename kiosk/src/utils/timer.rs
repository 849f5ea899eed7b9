//! One-shot timers scoped to their owner's lifetime.
//!
//! A [`ScopedTimer`] spawns a background task that sleeps for a fixed delay
//! and then delivers a single event on an MPSC channel. The task is aborted
//! when the handle is dropped, so a timer can never outlive the component that
//! started it: dropping the owner, replacing the handle, or calling
//! [`ScopedTimer::cancel`] all stop delivery.
//!
//! Because the event may already be sitting in the channel when the handle is
//! dropped, receivers should tag events (for example with a ticket number) and
//! ignore ones that no longer match their state.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use review_kiosk::utils::ScopedTimer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(8);
//!     let _timer = ScopedTimer::after(Duration::from_millis(50), tx, "fired");
//!
//!     assert_eq!(rx.recv().await, Some("fired"));
//! }
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Handle to a one-shot timer task; aborts the task on drop.
#[derive(Debug)]
pub struct ScopedTimer {
    delay: Duration,
    task_handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Starts a timer that sends `event` on `tx` once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime. If the receiver is gone by
    /// the time the delay elapses the event is silently discarded.
    #[must_use]
    pub fn after<E>(delay: Duration, tx: mpsc::Sender<E>, event: E) -> Self
    where
        E: Send + 'static,
    {
        let task_handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(event).await.is_err() {
                trace!("timer receiver dropped before delivery");
            }
        });

        Self { delay, task_handle }
    }

    /// The delay this timer was started with.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` once the event has been delivered or the task aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task_handle.is_finished()
    }

    /// Cancels the timer. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.task_handle.abort();
    }
}
