//! Session store: who is logged in, once we know.
//!
//! The store starts out not ready. `load` fetches the profile once; when that
//! fetch resolves the store becomes ready and stays ready for its lifetime.
//! Until then the identity is unknown, which is not the same as anonymous.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use domain::User;

use crate::api::AuthApi;

/// What the client knows about the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The profile fetch has not resolved yet
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Snapshot {
    ready: bool,
    user: Option<User>,
    /// Set once login or logout has replaced the identity explicitly
    touched: bool,
}

impl Snapshot {
    fn state(&self) -> SessionState {
        match (&self.user, self.ready) {
            (Some(user), _) => SessionState::Authenticated(user.clone()),
            (None, true) => SessionState::Anonymous,
            (None, false) => SessionState::Unknown,
        }
    }
}

/// Shared handle to the session. Clones observe the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    snapshot: watch::Sender<Snapshot>,
    load_started: AtomicBool,
}

impl SessionStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(Inner {
                snapshot,
                load_started: AtomicBool::new(false),
            }),
        }
    }

    /// Fetch the profile and mark the store ready.
    ///
    /// Only the first call performs the fetch; later calls return the
    /// current state without touching the API. A failed fetch is logged and
    /// resolves as anonymous so the application never waits forever.
    pub async fn load(&self, api: &dyn AuthApi) -> SessionState {
        if self.inner.load_started.swap(true, Ordering::SeqCst) {
            debug!("Session load already started, skipping");
            return self.state();
        }
        let mut started = LoadStarted {
            flag: &self.inner.load_started,
            resolved: false,
        };

        let fetched = match api.profile().await {
            Ok(user) => user,
            Err(e) => {
                warn!(code = e.code(), "Profile fetch failed, treating session as anonymous: {}", e);
                None
            }
        };

        self.inner.snapshot.send_modify(|s| {
            if s.ready {
                return;
            }
            // A login that finished before the profile fetch wins.
            if !s.touched {
                s.user = fetched;
            }
            s.ready = true;
        });
        started.resolved = true;

        let state = self.state();
        match &state {
            SessionState::Authenticated(user) => info!(user_id = user.id, "Session restored"),
            _ => debug!("No active session"),
        }
        state
    }

    /// Start `load` in the background, for use at application start.
    pub fn spawn_load(&self, api: Arc<dyn AuthApi>) -> JoinHandle<SessionState> {
        let store = self.clone();
        tokio::spawn(async move { store.load(api.as_ref()).await })
    }

    /// Wait until the initial profile fetch has resolved.
    pub async fn wait_ready(&self) -> SessionState {
        let mut rx = self.inner.snapshot.subscribe();
        if let Err(e) = rx.wait_for(|s| s.ready).await {
            warn!("Session store closed while waiting: {}", e);
        }
        self.state()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.snapshot.borrow().ready
    }

    pub fn state(&self) -> SessionState {
        self.inner.snapshot.borrow().state()
    }

    /// Current user. `None` both before the store is ready and when anonymous;
    /// use [`SessionStore::state`] to tell the two apart.
    pub fn current_user(&self) -> Option<User> {
        self.inner.snapshot.borrow().user.clone()
    }

    /// Replace the identity after a successful login.
    pub fn set_current_user(&self, user: User) {
        debug!(user_id = user.id, "Session user replaced");
        self.inner.snapshot.send_modify(|s| {
            s.user = Some(user);
            s.touched = true;
        });
    }

    /// Drop the identity after logout.
    pub fn clear(&self) {
        debug!("Session cleared");
        self.inner.snapshot.send_modify(|s| {
            s.user = None;
            s.touched = true;
        });
    }

    /// Watch session changes; yields a fresh [`SessionState`] on each change.
    pub fn subscribe(&self) -> SessionWatcher {
        SessionWatcher {
            rx: self.inner.snapshot.subscribe(),
        }
    }
}

/// Releases the one-time load claim if the fetch is dropped before it
/// resolves, so a later `load` can try again.
struct LoadStarted<'a> {
    flag: &'a AtomicBool,
    resolved: bool,
}

impl Drop for LoadStarted<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.flag.store(false, Ordering::SeqCst);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish()
    }
}

/// Receiver side of [`SessionStore::subscribe`].
pub struct SessionWatcher {
    rx: watch::Receiver<Snapshot>,
}

impl SessionWatcher {
    /// Wait for the next change. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().state())
    }

    pub fn state(&self) -> SessionState {
        self.rx.borrow().state()
    }
}
