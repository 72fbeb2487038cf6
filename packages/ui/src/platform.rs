//! Platform wiring for the profile page.
//!
//! Picks the session backend and the client configuration for the target:
//! - **Web** (WASM + `web` feature): `localStorage` via [`session::LocalStorageStore`],
//!   backend at the page's own origin
//! - **Desktop / Mobile** (native): files under `<data_dir>/profile-client/` via
//!   [`session::FileStore`], backend from `<config_dir>/profile-client/client.toml`

use session::{ClientConfig, Session};

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
const APP_DIR: &str = "profile-client";

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = session::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = session::FileStore;

/// Load the client configuration for this platform.
///
/// A broken config file is logged and replaced by the defaults; the page
/// still renders, it just talks to the default backend.
pub fn load_config() -> ClientConfig {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        match web_sys::window().and_then(|w| w.location().origin().ok()) {
            Some(origin) => ClientConfig::new(origin),
            None => ClientConfig::default(),
        }
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let path = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(APP_DIR)
            .join(ClientConfig::filename());
        match ClientConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring client config");
                ClientConfig::default()
            }
        }
    }
}

/// Create the platform-appropriate session for the configured token key.
pub fn make_session(config: &ClientConfig) -> Session<PlatformStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Session::with_config(session::LocalStorageStore::new(), &config.session)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(APP_DIR);
        Session::with_config(session::FileStore::new(base), &config.session)
    }
}

/// Show a blocking alert. Only the browser has one; elsewhere the message is
/// logged here and rendered inline from the page state.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!(%message, "alert");
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_native_alert_only_logs() {
        // No window on native: the message goes to the log and nothing blocks.
        alert("request failed with status code 500");
    }
}
