//! File-based storage implementation for native platforms.

use super::{SceneStorage, StorageError, StorageResult};
use crate::store::ActionStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each scene as a JSON file in a directory.
#[derive(Debug)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the user's local data directory.
    ///
    /// On Linux: `~/.local/share/inkshare/`
    /// On Windows: `%LOCALAPPDATA%\inkshare\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("inkshare"))
    }

    fn scene_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl SceneStorage for FileStorage {
    fn save(&self, key: &str, store: &ActionStore) -> StorageResult<()> {
        let path = self.scene_path(key);
        let json = store
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn load(&self, key: &str) -> StorageResult<ActionStore> {
        let path = self.scene_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        ActionStore::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.scene_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.scene_path(key).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, CircleAction};
    use crate::storage::LOCAL_SCENE_KEY;
    use kurbo::Point;
    use tempfile::tempdir;

    fn scene() -> ActionStore {
        ActionStore::new().with(Action::Circle(CircleAction::from_drag(
            Point::ZERO,
            Point::new(40.0, 0.0),
            "#561ecb",
            2.0,
        )))
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let store = scene();
        storage.save(LOCAL_SCENE_KEY, &store).unwrap();
        assert_eq!(storage.load(LOCAL_SCENE_KEY).unwrap(), store);
        assert!(dir.path().join("inkshare_actions.json").exists());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(storage.load("nonexistent"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.save("test", &scene()).unwrap();
        assert!(storage.exists("test").unwrap());
        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_file_storage_corrupt_scene() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        assert!(matches!(storage.load("broken"), Err(StorageError::Serialization(_))));
    }
}
