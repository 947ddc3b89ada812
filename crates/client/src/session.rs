//! Session token persistence and the session-cleared signal.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::api::ApiRegistry;
use crate::storage;

/// Storage key holding the serialized session token.
const TOKEN_KEY: &str = "token";

/// Durable, reactive holder of the current session token.
///
/// The in-memory value is the source of truth; the persisted copy is best
/// effort. Storage failures are logged and the store degrades to memory-only
/// for that operation — they are never surfaced to callers.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<TokenStoreInner>,
}

struct TokenStoreInner {
    dir: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Open the store backed by the default storage directory.
    pub fn new() -> Self {
        let dir = storage::default_dir();
        if dir.is_none() {
            tracing::warn!("no config directory available, session token will not persist");
        }
        Self::with_dir(dir)
    }

    /// Open the store backed by an explicit directory (`None` = memory only).
    pub fn with_dir(dir: Option<PathBuf>) -> Self {
        let token = dir
            .as_deref()
            .and_then(|dir| storage::load::<String>(dir, TOKEN_KEY));
        Self {
            inner: Arc::new(TokenStoreInner {
                dir,
                token: RwLock::new(token),
            }),
        }
    }

    /// The current token, or `None` when logged out.
    pub fn read(&self) -> Option<String> {
        self.inner.token.read().unwrap().clone()
    }

    /// Replace the current token. `None` logs out and removes the persisted
    /// value.
    pub fn write(&self, token: Option<&str>) {
        *self.inner.token.write().unwrap() = token.map(str::to_owned);
        let Some(dir) = self.inner.dir.as_deref() else {
            return;
        };
        match token {
            Some(token) => {
                if !storage::save(dir, TOKEN_KEY, &token) {
                    tracing::warn!("failed to persist session token, keeping it in memory only");
                }
            }
            None => storage::remove(dir, TOKEN_KEY),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Process-wide broadcast for the "session cleared" signal.
///
/// An explicit observer registry instead of an ambient event bus: the API
/// registry owns one and emits through it, and anything interested (UI
/// guards, the session manager) subscribes. Subscribing returns a disposer
/// guard; dropping it unregisters the observer.
#[derive(Clone, Default)]
pub struct SessionEvents {
    inner: Arc<EventsInner>,
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEvents").finish_non_exhaustive()
    }
}

#[derive(Default)]
struct EventsInner {
    next_id: AtomicU64,
    observers: Mutex<HashMap<u64, Observer>>,
}

/// Disposer for a [`SessionEvents`] subscription.
#[must_use = "dropping the subscription unregisters the observer"]
pub struct SessionSubscription {
    id: u64,
    inner: Weak<EventsInner>,
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.observers.lock().unwrap().remove(&self.id);
        }
    }
}

impl SessionEvents {
    /// Register an observer for the session-cleared signal.
    pub fn subscribe(&self, observer: impl Fn() + Send + Sync + 'static) -> SessionSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .observers
            .lock()
            .unwrap()
            .insert(id, Arc::new(observer));
        SessionSubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Notify every observer that the session was invalidated.
    pub fn emit_cleared(&self) {
        let observers: Vec<Observer> = self
            .inner
            .observers
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect();
        for observer in observers {
            observer();
        }
    }
}

/// Ties the token store to the API registry and the session-cleared signal.
///
/// On construction the persisted token (if any) is pushed into the registry,
/// and a subscription is installed so that an auth failure reported by any
/// API client clears the stored token. UI guards observing the same signal
/// are expected to route back to the login screen.
pub struct SessionManager {
    store: TokenStore,
    registry: Arc<ApiRegistry>,
    _cleared: SessionSubscription,
}

impl SessionManager {
    pub fn new(store: TokenStore, registry: Arc<ApiRegistry>) -> Self {
        registry.set_token(store.read().as_deref());
        let cleared = registry.session_events().subscribe({
            let store = store.clone();
            move || store.write(None)
        });
        Self {
            store,
            registry,
            _cleared: cleared,
        }
    }

    /// The current session token.
    pub fn token(&self) -> Option<String> {
        self.store.read()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.read().is_some()
    }

    /// Record a freshly issued token (login/registration) and propagate it
    /// to every API client.
    pub fn establish(&self, token: &str) {
        self.store.write(Some(token));
        self.registry.set_token(Some(token));
    }

    /// Explicit logout: clear the persisted token, de-authorize every API
    /// client and fire the session-cleared signal.
    pub fn logout(&self) {
        tracing::info!("session: logging out");
        self.store.write(None);
        self.registry.set_token(None);
        self.registry.session_events().emit_cleared();
    }
}
