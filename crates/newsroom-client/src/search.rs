//! Debounced search input and request generations.
//!
//! A search field owns one [`Debouncer`]: every keystroke cancels the pending
//! timer and starts a new one. Requests already sent are not cancelled;
//! instead each request takes a stamp from [`Generations`] and its response is
//! applied only while that stamp is still the latest.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Monotonic request stamps.
#[derive(Debug, Default)]
pub struct Generations(AtomicU64);

impl Generations {
    /// Stamp a new request; it supersedes every earlier stamp.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether no request has been stamped since `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// A single pending timer, rescheduled on every call.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// A debouncer that waits `delay` of quiet before firing.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `task` once `delay` passes without another call.
    ///
    /// Must be called within a tokio runtime. Once the timer fires the task
    /// runs detached, so a later call cannot cancel it.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(timer);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending timer, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
