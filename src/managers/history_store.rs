//! History Store for SnipStash.
//!
//! CRUD over the single persisted history list, backed by the key-value
//! [`Storage`] collaborator. Every mutation is a read-modify-write of the
//! whole list with no compare-and-swap: concurrent mutations from two
//! execution contexts (e.g. two open viewer pages) are last-write-wins.
//! This is an accepted limitation of the storage model.
//!
//! All public operations fail open: a storage failure is logged and
//! reported as an empty list / `None` id / `false` success flag rather
//! than propagated, so the page never gets stuck on a broken backend.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::storage::{keys, Storage};
use crate::types::errors::StorageError;
use crate::types::history::{HistoryItem, Link, PendingLink, PayloadFormat, Snippet};

/// History store fronting the persisted history list.
#[derive(Clone)]
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Current UNIX timestamp in milliseconds.
    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Generates a fresh history item id.
    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    async fn read_list(&self) -> Result<Vec<HistoryItem>, StorageError> {
        let result = self.storage.get(&[keys::FORMAT_HISTORY]).await?;
        match result.get(keys::FORMAT_HISTORY) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn write_list(&self, items: &[HistoryItem]) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(items).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let entries = HashMap::from([(keys::FORMAT_HISTORY.to_string(), value)]);
        self.storage.set(entries).await
    }

    async fn prepend(&self, item: HistoryItem) -> Result<String, StorageError> {
        let id = item.id().to_string();
        let mut items = self.read_list().await?;
        items.insert(0, item);
        self.write_list(&items).await?;
        Ok(id)
    }

    /// Loads the full history list, newest first.
    ///
    /// Returns an empty list on any read failure.
    pub async fn load(&self) -> Vec<HistoryItem> {
        match self.read_list().await {
            Ok(items) => items,
            Err(e) => {
                warn!("failed to load history: {}", e);
                Vec::new()
            }
        }
    }

    /// Builds a snippet entry with a fresh id and timestamp, prepends it to
    /// the list, and persists. Returns the new id, or `None` on failure.
    pub async fn append_snippet(&self, content: &str, format: PayloadFormat) -> Option<String> {
        let item = HistoryItem::Snippet(Snippet {
            id: Self::new_id(),
            content: content.to_string(),
            format,
            timestamp: Self::now_millis(),
        });
        match self.prepend(item).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("failed to save snippet to history: {}", e);
                None
            }
        }
    }

    /// Same shape for a link entry. An empty title defaults to the url.
    pub async fn append_link(
        &self,
        url: &str,
        title: &str,
        fav_icon_url: Option<&str>,
    ) -> Option<String> {
        let item = HistoryItem::Link(Link {
            id: Self::new_id(),
            url: url.to_string(),
            title: if title.is_empty() { url } else { title }.to_string(),
            fav_icon_url: fav_icon_url.map(str::to_string),
            timestamp: Self::now_millis(),
        });
        match self.prepend(item).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("failed to save link to history: {}", e);
                None
            }
        }
    }

    /// Removes every item with the given id and persists the rest.
    ///
    /// A no-op removal (id not found) still reports success; only a failed
    /// persist reports `false`. Idempotent by design.
    pub async fn delete_by_id(&self, id: &str) -> bool {
        let mut items = self.load().await;
        items.retain(|item| item.id() != id);
        match self.write_list(&items).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to delete history item {}: {}", id, e);
                false
            }
        }
    }

    /// Replaces the persisted list with an empty one, unconditionally.
    pub async fn clear_all(&self) -> bool {
        match self.write_list(&[]).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to clear history: {}", e);
                false
            }
        }
    }

    // ─── Transient payload slots ───

    /// Writes a captured selection into the pending-snippet slot.
    pub async fn stash_pending_snippet(&self, content: &str) -> Result<(), StorageError> {
        let entries = HashMap::from([(
            keys::PENDING_SNIPPET.to_string(),
            Value::String(content.to_string()),
        )]);
        self.storage.set(entries).await
    }

    /// Writes a captured link into the pending-link slot.
    pub async fn stash_pending_link(&self, link: &PendingLink) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(link).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let entries = HashMap::from([(keys::PENDING_LINK.to_string(), value)]);
        self.storage.set(entries).await
    }

    /// Consumes the pending-snippet slot: read once, then deleted.
    ///
    /// Returns `None` when the slot is empty or the read fails.
    pub async fn take_pending_snippet(&self) -> Option<String> {
        let result = match self.storage.get(&[keys::PENDING_SNIPPET]).await {
            Ok(result) => result,
            Err(e) => {
                warn!("failed to read pending snippet: {}", e);
                return None;
            }
        };
        let content = result
            .get(keys::PENDING_SNIPPET)
            .and_then(|v| v.as_str())
            .map(str::to_string)?;
        if let Err(e) = self.storage.remove(&[keys::PENDING_SNIPPET]).await {
            warn!("failed to clear pending snippet slot: {}", e);
        }
        Some(content)
    }

    /// Consumes the pending-link slot: read once, then deleted.
    pub async fn take_pending_link(&self) -> Option<PendingLink> {
        let result = match self.storage.get(&[keys::PENDING_LINK]).await {
            Ok(result) => result,
            Err(e) => {
                warn!("failed to read pending link: {}", e);
                return None;
            }
        };
        let link = result
            .get(keys::PENDING_LINK)
            .and_then(|v| serde_json::from_value::<PendingLink>(v.clone()).ok())?;
        if let Err(e) = self.storage.remove(&[keys::PENDING_LINK]).await {
            warn!("failed to clear pending link slot: {}", e);
        }
        Some(link)
    }
}
