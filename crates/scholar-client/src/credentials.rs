//! Bearer token and signed-in user, shared by every service.
//!
//! A [`CredentialStore`] is a cheap handle: clones share the same state.
//! Writes go to memory first and then to the persisted mirror, so a
//! storage failure never leaves the running client without its token.

use std::fmt;
use std::sync::{Arc, RwLock};

use scholar_common::StorageError;
use tracing::warn;

use crate::storage::{get_json, set_json, KeyValueStore, MemoryStore};
use crate::types::User;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

#[derive(Default)]
struct Credentials {
    token: Option<String>,
    user: Option<User>,
}

#[derive(Clone)]
pub struct CredentialStore {
    state: Arc<RwLock<Credentials>>,
    backing: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("CredentialStore")
            .field("token", &state.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &state.user.as_ref().map(|u| &u.id))
            .finish()
    }
}

impl CredentialStore {
    /// Restore credentials from `backing`. A corrupt user record is dropped.
    pub fn load(backing: Arc<dyn KeyValueStore>) -> Self {
        let token = backing.get(TOKEN_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "failed to read stored token");
            None
        });
        let user = get_json::<User>(backing.as_ref(), USER_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable stored user");
            None
        });

        Self {
            state: Arc::new(RwLock::new(Credentials { token, user })),
            backing,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .token
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .token
            .is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .user
            .clone()
    }

    pub fn set_token(&self, token: impl Into<String>) -> Result<(), StorageError> {
        let token = token.into();
        self.state.write().unwrap_or_else(|e| e.into_inner()).token = Some(token.clone());
        self.backing.set(TOKEN_KEY, &token)
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.state.write().unwrap_or_else(|e| e.into_inner()).token = None;
        self.backing.remove(TOKEN_KEY)
    }

    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        self.state.write().unwrap_or_else(|e| e.into_inner()).user = Some(user.clone());
        set_json(self.backing.as_ref(), USER_KEY, user)
    }

    /// Forget token and user. Both are cleared even if one removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.token = None;
            state.user = None;
        }
        let token = self.backing.remove(TOKEN_KEY);
        let user = self.backing.remove(USER_KEY);
        token.and(user)
    }
}
