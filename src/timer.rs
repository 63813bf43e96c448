//! Cancellable one-shot debounce timer.
//!
//! DESIGN
//! ======
//! Each `schedule` spawns a task that races the delay against a oneshot
//! cancel channel. The `Debounce` keeps only the newest sender: replacing or
//! dropping it cancels the previous task, so rapid reschedules collapse into
//! one run after the last quiet period.
//!
//! Cancellation only reaches a task that is still waiting. Once the delay has
//! elapsed the scheduled future runs to completion; a save already in flight
//! is never torn down halfway.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    cancel: Mutex<Option<oneshot::Sender<()>>>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, cancel: Mutex::new(None) }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `fut` after the delay unless rescheduled or cancelled first.
    /// Any earlier schedule still waiting is cancelled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<()>();
        let delay = self.delay;
        // Dropping the previous sender wakes its task with a closed channel.
        drop(self.slot().replace(tx));

        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => fut.await,
                _ = rx => {}
            }
        });
    }

    /// Cancel the waiting schedule, if any. Returns true if one was waiting.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// True while a scheduled future is still waiting for its delay.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.slot().as_ref().is_some_and(|tx| !tx.is_closed())
    }

    fn slot(&self) -> MutexGuard<'_, Option<oneshot::Sender<()>>> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
