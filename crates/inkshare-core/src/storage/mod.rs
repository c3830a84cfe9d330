//! Local persistence of the scene.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::store::ActionStore;
use thiserror::Error;

/// Key the current scene is kept under.
pub const LOCAL_SCENE_KEY: &str = "inkshare.actions";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Scene not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A key/value store for serialized scenes.
pub trait SceneStorage: Send + Sync {
    fn save(&self, key: &str, store: &ActionStore) -> StorageResult<()>;

    fn load(&self, key: &str) -> StorageResult<ActionStore>;

    fn delete(&self, key: &str) -> StorageResult<()>;

    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Load the scene under `key`, treating a missing entry as an empty scene.
pub fn load_or_empty(storage: &dyn SceneStorage, key: &str) -> StorageResult<ActionStore> {
    match storage.load(key) {
        Err(StorageError::NotFound(_)) => Ok(ActionStore::new()),
        other => other,
    }
}
