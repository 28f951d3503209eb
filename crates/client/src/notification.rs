//! Single-slot notification channel with timed auto-dismiss.
//!
//! The channel holds at most one notification. A new `notify()` replaces the
//! current one instead of queueing behind it, and the replaced notification's
//! timer is aborted. Each timer also carries the generation it was scheduled
//! for and only clears the slot if that generation is still current, so a
//! timer that already woke up cannot clear a newer notification.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use domain::DEFAULT_NOTIFICATION_TIMEOUT_MS;

/// Severity of a notification, used by renderers to pick a style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Handle to the notification slot. Cheap to clone; all clones share one slot.
///
/// `notify` schedules its timer with `tokio::spawn`, so it must be called
/// from within a Tokio runtime.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

struct Inner {
    timeout: Duration,
    slot: Mutex<Slot>,
    current: watch::Sender<Option<Notification>>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl NotificationCenter {
    /// Create a channel whose notifications clear after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                timeout,
                slot: Mutex::new(Slot::default()),
                current,
            }),
        }
    }

    /// Show `message`, replacing whatever is currently displayed.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        debug!(kind = %kind, message = %notification.message, "Showing notification");

        let mut slot = self.inner.lock_slot();
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.inner.current.send_replace(Some(notification));

        let generation = slot.generation;
        let timeout = self.inner.timeout;
        let inner = Arc::downgrade(&self.inner);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            expire(inner, generation);
        }));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Info);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Error);
    }

    /// Clear the slot now. Does nothing when nothing is showing.
    pub fn dismiss(&self) {
        let mut slot = self.inner.lock_slot();
        if self.inner.current.borrow().is_none() {
            return;
        }
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.inner.current.send_replace(None);
        debug!("Notification dismissed");
    }

    /// Notification currently showing, if any.
    pub fn current(&self) -> Option<Notification> {
        self.inner.current.borrow().clone()
    }

    pub fn is_showing(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Watch the slot, e.g. from a rendering task.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.current.subscribe()
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS))
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("timeout", &self.inner.timeout)
            .field("current", &self.current())
            .finish()
    }
}

impl Inner {
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
    }
}

fn expire(inner: Weak<Inner>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut slot = inner.lock_slot();
    if slot.generation != generation {
        return;
    }
    slot.timer = None;
    inner.current.send_replace(None);
    debug!("Notification expired");
}
