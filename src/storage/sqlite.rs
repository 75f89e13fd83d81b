//! SQLite-backed key-value storage for SnipStash.
//!
//! Wraps a `rusqlite::Connection` behind the [`Storage`] trait and runs the
//! schema migration on open. Values are stored as JSON text in a single
//! `kv_store` table.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::Storage;
use crate::types::errors::StorageError;

/// Key-value store persisted in a SQLite database file.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) a SQLite database at the given file path and runs migrations.
    ///
    /// # Errors
    /// Returns `StorageError::Backend` if the connection cannot be established
    /// or the migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// Useful for testing — the database is discarded when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Backend(e.to_string()))?;
        Self::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates the key-value table if it does not exist.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS` so the migration is idempotent and
    /// safe to run on every startup.
    fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Backend("storage mutex poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, StorageError> {
        let conn = self.lock()?;
        let mut result = HashMap::new();
        for key in keys {
            // No row means the key is absent; any other error is a real
            // backend failure and must surface.
            let row: Option<String> = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| StorageError::Backend(e.to_string()))?;
            if let Some(text) = row {
                let value: Value = serde_json::from_str(&text)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                result.insert(key.to_string(), value);
            }
        }
        Ok(result)
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<(), StorageError> {
        let conn = self.lock()?;
        for (key, value) in entries {
            let text = serde_json::to_string(&value)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            conn.execute(
                "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
                params![key, text],
            )
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let conn = self.lock()?;
        for key in keys {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
                .map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        Ok(())
    }
}
