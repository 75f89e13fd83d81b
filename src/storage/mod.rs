//! Key-value storage backends for SnipStash.
//!
//! The [`Storage`] trait models the host's asynchronous key-value storage
//! primitive: string keys mapped to JSON-serializable values. [`SqliteStorage`]
//! persists to a SQLite file; [`MemoryStorage`] backs tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::errors::StorageError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Storage keys used by the application.
pub mod keys {
    /// One-shot slot holding a just-captured text selection.
    pub const PENDING_SNIPPET: &str = "pendingSnippet";
    /// One-shot slot holding a just-captured link payload.
    pub const PENDING_LINK: &str = "pendingLink";
    /// The persisted history list.
    pub const FORMAT_HISTORY: &str = "formatHistory";
}

/// Asynchronous key-value storage over string keys and JSON values.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetches the values for the given keys. Keys with no stored value
    /// are simply absent from the returned map.
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, StorageError>;

    /// Stores every entry in the map, replacing existing values.
    async fn set(&self, entries: HashMap<String, Value>) -> Result<(), StorageError>;

    /// Removes the given keys. Removing an absent key is not an error.
    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError>;
}
