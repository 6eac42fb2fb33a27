//! Session store: who, if anyone, is signed in.
//!
//! DESIGN
//! ======
//! Memory is the source of truth; storage is a mirror. `get_user` falls back
//! to one storage read only while memory is empty, and adopts whatever it
//! finds. In [`PersistenceMode::MemoryOnly`] storage is never touched and the
//! session ends with the page.
//!
//! ERROR HANDLING
//! ==============
//! No operation returns an error. Storage failures are logged and the
//! in-memory session stays authoritative; a stored value that does not parse
//! is treated as absent and removed. Every failure leans towards signing the
//! user out: a sign-out whose storage removal fails turns rehydration off
//! until the next sign-in, and a failed write drops the older stored user.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::storage::SessionStorage;
use crate::config::{PersistenceMode, ShellConfig};

/// The signed-in user record. Opaque to the guard: only its presence matters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionUser(Map<String, Value>);

impl SessionUser {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a single field of the record.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SessionUser {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Anything the navigation guard can ask "is someone signed in?".
pub trait AuthSource {
    fn is_authenticated(&self) -> bool;
}

/// In-memory half of the session.
#[derive(Debug, Default)]
struct Slot {
    user: Option<SessionUser>,
    /// Set when a sign-out could not remove the stored entry; rehydration
    /// stays off until the next `set_user` so the old user cannot come back.
    restore_blocked: bool,
}

/// Owns the current session and its durable mirror.
///
/// Construct one at startup and hand it (by reference or `Arc`) to the guard
/// and to whatever performs sign-in and sign-out.
#[derive(Debug)]
pub struct SessionStore<S> {
    slot: Mutex<Slot>,
    storage: S,
    key: String,
    mode: PersistenceMode,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Empty store persisting under `key` according to `mode`.
    pub fn new(storage: S, key: impl Into<String>, mode: PersistenceMode) -> Self {
        Self { slot: Mutex::new(Slot::default()), storage, key: key.into(), mode }
    }

    /// Empty store using the session key and persistence mode from `config`.
    pub fn from_config(storage: S, config: &ShellConfig) -> Self {
        Self::new(storage, config.session_key.clone(), config.persistence)
    }

    #[must_use]
    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the session with `user` and mirror it to storage.
    pub fn set_user(&self, user: SessionUser) {
        let mut slot = self.lock();
        if self.mode == PersistenceMode::Persistent {
            self.persist(&user);
        }
        slot.user = Some(user);
        slot.restore_blocked = false;
        log::debug!("session: user set");
    }

    /// Sign out. Clearing an empty session is a no-op.
    pub fn clear_user(&self) {
        let mut slot = self.lock();
        slot.user = None;
        if self.mode == PersistenceMode::Persistent {
            if let Err(e) = self.storage.remove(&self.key) {
                log::warn!("session: failed to remove stored session, ignoring it until next sign-in: {e}");
                slot.restore_blocked = true;
            }
        }
        log::debug!("session: user cleared");
    }

    /// Current user, rehydrating from storage if memory is empty.
    #[must_use]
    pub fn get_user(&self) -> Option<SessionUser> {
        let mut slot = self.lock();
        if slot.user.is_none() && !slot.restore_blocked && self.mode == PersistenceMode::Persistent {
            slot.user = self.load();
        }
        slot.user.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, user: &SessionUser) {
        let written = serde_json::to_string(user)
            .map_err(|e| e.to_string())
            .and_then(|raw| self.storage.set(&self.key, &raw).map_err(|e| e.to_string()));
        if let Err(e) = written {
            log::warn!("session: failed to persist user, keeping it in memory only: {e}");
            // An older stored user must not come back after a reload.
            if let Err(e) = self.storage.remove(&self.key) {
                log::warn!("session: failed to remove stale stored session: {e}");
            }
        }
    }

    fn load(&self) -> Option<SessionUser> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("session: failed to read stored session: {e}");
                return None;
            }
        };
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => {
                log::debug!("session: user restored from storage");
                Some(user)
            }
            Err(e) => {
                log::warn!("session: discarding malformed stored session: {e}");
                if let Err(e) = self.storage.remove(&self.key) {
                    log::warn!("session: failed to remove malformed session: {e}");
                }
                None
            }
        }
    }
}

impl<S: SessionStorage> AuthSource for SessionStore<S> {
    fn is_authenticated(&self) -> bool {
        self.get_user().is_some()
    }
}

impl<S: SessionStorage> SessionStore<S> {
    /// True iff [`Self::get_user`] returns a user.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        AuthSource::is_authenticated(self)
    }
}

impl<A: AuthSource + ?Sized> AuthSource for std::sync::Arc<A> {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

impl<A: AuthSource + ?Sized> AuthSource for std::rc::Rc<A> {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

impl<A: AuthSource + ?Sized> AuthSource for &A {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}
