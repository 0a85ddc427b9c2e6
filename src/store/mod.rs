//! # Storage Layer
//!
//! The favorites collection is persisted as a single JSON blob under one
//! fixed key, the way a browser profile would keep it in local storage.
//! The [`StorageBackend`] trait abstracts where that blob lives:
//!
//! - [`fs::FileStore`]: production storage, `favorites.json` in the user
//!   data directory
//! - [`memory::InMemoryStore`]: in-memory storage for tests
//!
//! The backend deals in raw strings on purpose. Decoding — including the
//! shape-sniffing migration of older blobs — belongs to the command
//! layer, so a backend never fails on malformed content, only on I/O.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract home of the favorites blob.
pub trait StorageBackend {
    /// Read the blob, or `None` if nothing was ever saved.
    fn read_blob(&self) -> Result<Option<String>>;

    /// Replace the blob atomically from the caller's point of view —
    /// the full collection is written on every mutation, never a delta.
    fn write_blob(&mut self, payload: &str) -> Result<()>;
}
