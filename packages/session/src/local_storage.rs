//! # Browser `localStorage` session store
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the web platform. It
//! reads and writes the window's `localStorage` through `web-sys`, which is
//! where the login page leaves the `accessToken`.
//!
//! Every operation re-fetches `window.localStorage`; the handle is not `Send`
//! and is cheap to obtain. Errors (storage disabled, quota exceeded, private
//! mode) are swallowed: reads return `None`, writes do nothing.

use web_sys::Storage;

use crate::store::SessionStore;

/// `window.localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    async fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    async fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
