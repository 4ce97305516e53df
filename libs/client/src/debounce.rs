//! Delay-and-cancel debouncing for the search box.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay the search box waits after the last keystroke.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1500);

/// Publishes the search text once typing has paused for `delay`.
///
/// Every [`input`](Self::input) cancels the pending publish and starts a new
/// timer, so only the last value of a burst reaches subscribers. Must be used
/// inside a tokio runtime.
pub struct SearchDebouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    settled: watch::Sender<String>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        let (settled, _) = watch::channel(String::new());
        Self {
            delay,
            pending: Mutex::new(None),
            settled,
        }
    }

    /// Receiver that sees each settled search value.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.settled.subscribe()
    }

    /// Last settled value.
    pub fn settled(&self) -> String {
        self.settled.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Record a keystroke.
    pub fn input(&self, value: impl Into<String>) {
        let value = value.into();
        let delay = self.delay;
        let settled = self.settled.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(search = %value, "Search settled");
            settled.send_replace(value);
        });

        if let Some(previous) = self.lock_pending().replace(task) {
            previous.abort();
        }
    }

    /// Drop any pending value without publishing it.
    pub fn cancel(&self) {
        if let Some(task) = self.lock_pending().take() {
            task.abort();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
