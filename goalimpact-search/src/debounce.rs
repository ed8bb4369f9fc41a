//! Cancel-and-replace delayed action slot
//!
//! At most one pending action per [`Debouncer`]. Arming again aborts the
//! previous timer, so only the last action armed within a window runs.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` after the delay unless re-armed or cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });

        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    /// Drop any pending action. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.slot().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }
}
