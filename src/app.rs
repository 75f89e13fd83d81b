//! App Core for SnipStash.
//!
//! Wires the storage backend, history store, and page controller together,
//! and exposes the capture surface the host's menu/command triggers call
//! into: stash the captured payload in its transient slot, then open the
//! viewer page, which consumes the slot on its next load.

use std::sync::Arc;

use tracing::{info, warn};

use crate::controller::{ConfirmPrompt, PageController, ViewOpener};
use crate::managers::history_store::HistoryStore;
use crate::storage::Storage;
use crate::types::history::PendingLink;

/// URL of the extension's viewer surface.
pub const VIEWER_URL: &str = "snipstash://viewer";

/// View opener that only logs, for headless use.
pub struct LoggingOpener;

impl ViewOpener for LoggingOpener {
    fn open_view(&self, url: &str) {
        info!(url = %url, "open view");
    }
}

/// Confirmation prompt that accepts everything, for headless use.
pub struct AutoConfirm;

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Central application struct.
pub struct App {
    store: HistoryStore,
    controller: PageController,
    opener: Arc<dyn ViewOpener>,
}

impl App {
    /// Creates a new App over the given storage backend and collaborators.
    pub fn new(
        storage: Arc<dyn Storage>,
        opener: Arc<dyn ViewOpener>,
        prompt: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        let store = HistoryStore::new(storage);
        let controller = PageController::new(store.clone(), opener.clone(), prompt);
        Self {
            store,
            controller,
            opener,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    /// "Format this text" trigger from the context menu or keyboard
    /// command. An empty or whitespace-only selection just opens the
    /// viewer, which will show the welcome state.
    pub async fn capture_selection(&self, selected_text: &str) {
        if selected_text.trim().is_empty() {
            self.opener.open_view(VIEWER_URL);
            return;
        }

        match self.store.stash_pending_snippet(selected_text).await {
            Ok(()) => self.opener.open_view(VIEWER_URL),
            Err(e) => warn!("failed to stash captured selection: {}", e),
        }
    }

    /// Saved-link trigger from the bookmark action.
    pub async fn capture_link(&self, url: &str, title: &str, fav_icon_url: Option<&str>) {
        let link = PendingLink {
            url: url.to_string(),
            title: title.to_string(),
            fav_icon_url: fav_icon_url.map(str::to_string),
        };
        match self.store.stash_pending_link(&link).await {
            Ok(()) => self.opener.open_view(VIEWER_URL),
            Err(e) => warn!("failed to stash captured link: {}", e),
        }
    }
}
