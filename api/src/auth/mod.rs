pub mod guards;

use rand::RngCore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The authorization context of one logged-in admin, inserted into request
/// extensions by the guard middleware.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
}

/// Process-local registry of live sessions, keyed by bearer token.
///
/// Tokens are issued at login and dropped at logout. There is no expiry:
/// sessions live exactly as long as the process, matching the
/// interactive-admin deployment model.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `username` and returns its freshly generated
    /// bearer token.
    pub fn open(&self, username: &str) -> String {
        let mut buf = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut buf);
        let token = hex::encode(buf);

        self.inner
            .write()
            .expect("session lock poisoned")
            .insert(
                token.clone(),
                Session {
                    username: username.to_string(),
                },
            );
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .get(token)
            .cloned()
    }

    /// Invalidates a token. Returns whether a session was actually open.
    pub fn close(&self, token: &str) -> bool {
        self.inner
            .write()
            .expect("session lock poisoned")
            .remove(token)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_get_returns_the_session() {
        let store = SessionStore::new();
        let token = store.open("admin");
        assert_eq!(store.get(&token).unwrap().username, "admin");
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let store = SessionStore::new();
        assert_ne!(store.open("admin"), store.open("admin"));
    }

    #[test]
    fn closed_token_no_longer_resolves() {
        let store = SessionStore::new();
        let token = store.open("admin");
        assert!(store.close(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.close(&token));
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        store.open("admin");
        assert!(store.get("deadbeef").is_none());
    }
}
