//! Copy-flag reset timers on the tokio runtime.
//!
//! One task per `(siret, field)`. Scheduling a key that already has a task
//! aborts the old one, so at most one expiry per key is ever in flight. A task
//! that fired before it could be aborted still carries its own handle, which
//! the session ignores once a newer copy owns the flag.

use std::collections::HashMap;
use std::time::Duration;

use sarnad_core::{CopyKey, TimerHandle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expired {
    pub(crate) key: CopyKey,
    pub(crate) handle: TimerHandle,
}

pub(crate) struct ExpiryScheduler {
    window: Duration,
    tx: mpsc::UnboundedSender<Expired>,
    tasks: HashMap<CopyKey, (TimerHandle, JoinHandle<()>)>,
}

impl ExpiryScheduler {
    pub(crate) fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<Expired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            window,
            tx,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Start the reset countdown for `key`, replacing any pending one.
    pub(crate) fn schedule(&mut self, key: CopyKey, handle: TimerHandle) {
        let deadline = Instant::now() + self.window;
        let tx = self.tx.clone();
        let expired = Expired {
            key: key.clone(),
            handle,
        };
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver gone means the session ended.
            let _ = tx.send(expired);
        });

        if let Some((_, previous)) = self.tasks.insert(key, (handle, task)) {
            previous.abort();
        }
    }

    pub(crate) fn cancel(&mut self, key: &CopyKey) {
        if let Some((_, task)) = self.tasks.remove(key) {
            task.abort();
        }
    }

    /// Forget the task behind a delivered expiry, unless it was replaced.
    pub(crate) fn fired(&mut self, expired: &Expired) {
        if self
            .tasks
            .get(&expired.key)
            .is_some_and(|(handle, _)| *handle == expired.handle)
        {
            self.tasks.remove(&expired.key);
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.values() {
            task.abort();
        }
    }
}
