pub mod config;
pub mod store;
pub mod token;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ClientConfig, ConfigError};
pub use store::{Session, SessionStore};
pub use token::{Claims, Identity, MalformedTokenError};
