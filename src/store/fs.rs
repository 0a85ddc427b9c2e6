use super::StorageBackend;
use crate::error::{CompassError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The one fixed key the favorites collection lives under.
const FAVORITES_FILENAME: &str = "favorites.json";

/// File-based backend rooted in the user data directory.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn blob_path(&self) -> PathBuf {
        self.data_dir.join(FAVORITES_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CompassError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FileStore {
    fn read_blob(&self) -> Result<Option<String>> {
        let path = self.blob_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CompassError::Io)?;
        Ok(Some(content))
    }

    fn write_blob(&mut self, payload: &str) -> Result<()> {
        self.ensure_dir(&self.data_dir)?;
        fs::write(self.blob_path(), payload).map_err(CompassError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_blob_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("compass"));
        assert!(store.read_blob().unwrap().is_none());
    }

    #[test]
    fn write_creates_directory_and_roundtrips() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested").join("compass"));
        store.write_blob("[]").unwrap();
        assert_eq!(store.read_blob().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn write_replaces_previous_blob() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        store.write_blob("[1]").unwrap();
        store.write_blob("[2]").unwrap();
        assert_eq!(store.read_blob().unwrap().as_deref(), Some("[2]"));
    }
}
