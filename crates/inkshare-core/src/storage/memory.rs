//! In-memory storage implementation.

use super::{SceneStorage, StorageError, StorageResult};
use crate::store::ActionStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and sessions that should not touch disk.
///
/// Scenes are kept serialized, the same as on disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    scenes: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.scenes.read().ok()?.get(key).cloned()
    }
}

impl SceneStorage for MemoryStorage {
    fn save(&self, key: &str, store: &ActionStore) -> StorageResult<()> {
        let json = store
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut scenes = self
            .scenes
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        scenes.insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<ActionStore> {
        let scenes = self
            .scenes
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let json = scenes
            .get(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        ActionStore::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut scenes = self
            .scenes
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        scenes.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let scenes = self
            .scenes
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(scenes.contains_key(key))
    }
}
