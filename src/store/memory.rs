use super::StorageBackend;
use crate::error::Result;

/// In-memory backend for tests. No persistence.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    blob: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-seeded blob, e.g. a legacy payload.
    pub fn with_blob(payload: impl Into<String>) -> Self {
        Self {
            blob: Some(payload.into()),
        }
    }
}

impl StorageBackend for InMemoryStore {
    fn read_blob(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write_blob(&mut self, payload: &str) -> Result<()> {
        self.blob = Some(payload.to_string());
        Ok(())
    }
}
