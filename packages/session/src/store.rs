//! # Session, the injected access-token provider
//!
//! [`Session`] is the only way the rest of the client reaches the stored
//! access token. It wraps any [`SessionStore`] backend, so the same code works
//! against browser `localStorage` (web), a directory of small files (desktop)
//! or an in-memory map (tests).
//!
//! ## [`SessionStore`] trait
//!
//! An async key/value interface over client-local strings: `get`, `set` and
//! `remove`. Implementations live in sibling modules ([`crate::memory`],
//! [`crate::file_store`], and `crate::local_storage` on wasm).
//!
//! [`Session::access_token`] is the only read the client needs: it returns
//! the raw token (empty counts as absent), and [`crate::token`] turns that
//! into viewer claims. The login flow that writes the token lives elsewhere.

use crate::config::SessionConfig;

/// Async trait for client-local string storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}

/// Access-token provider backed by a [`SessionStore`].
#[derive(Clone, Debug)]
pub struct Session<S: SessionStore> {
    store: S,
    token_key: String,
}

impl<S: SessionStore> Session<S> {
    /// Create a session reading the default `accessToken` key.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &SessionConfig::default())
    }

    /// Create a session using the configured storage key.
    pub fn with_config(store: S, config: &SessionConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
        }
    }

    /// The stored access token. An empty string counts as no token.
    pub async fn access_token(&self) -> Option<String> {
        self.store
            .get(&self.token_key)
            .await
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn test_empty_session_has_no_token() {
        let session = Session::new(MemoryStore::new());
        assert!(session.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_token_counts_as_absent() {
        let session = Session::new(MemoryStore::with_entry("accessToken", ""));
        assert!(session.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_reads_default_key() {
        let store = MemoryStore::with_entry("accessToken", "h.p.s");
        let session = Session::new(store.clone());
        assert_eq!(session.access_token().await.as_deref(), Some("h.p.s"));

        store.remove("accessToken").await;
        assert!(session.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_custom_token_key() {
        let store = MemoryStore::with_entry("accessToken", "ignored");
        store.set("jwt", "abc").await;
        let config = SessionConfig {
            token_key: "jwt".to_string(),
        };
        let session = Session::with_config(store, &config);
        assert_eq!(session.access_token().await.as_deref(), Some("abc"));
    }
}
