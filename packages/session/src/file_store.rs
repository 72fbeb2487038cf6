//! # Filesystem-backed session store
//!
//! [`FileStore`] is a [`SessionStore`] implementation that keeps each entry in
//! its own file. It is used on desktop and mobile, where there is no browser
//! `localStorage`, so that a login survives app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session/
//!     └── <key>          # raw value, e.g. the access token
//! ```
//!
//! The `ui` crate roots it under `dirs::data_dir()`.

use std::path::PathBuf;

use crate::store::SessionStore;

/// Filesystem-backed SessionStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are flat names; path separators would escape the session dir.
        let name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base.join("session").join(name)
    }
}

impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, value);
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.entry_path(key));
    }
}
