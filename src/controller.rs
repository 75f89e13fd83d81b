//! Page Controller for SnipStash.
//!
//! Orchestrates viewer startup (load history, consume pending payload
//! slots, render) and wires the user-initiated actions — item select,
//! delete, clear-all — to the history store and renderer through the
//! request router. The currently-displayed pointer lives in a page-scoped
//! [`Session`] owned by the controller, not in process-global state.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::warn;

use crate::managers::history_store::HistoryStore;
use crate::router::{Router, Swap, Trigger};
use crate::services::detector::detect_format;
use crate::services::renderer::{
    render_code_display, render_error, render_history_list, render_welcome,
};
use crate::types::errors::RouteError;
use crate::types::history::{HistoryItem, Snippet};

/// Opens the extension's viewer surface or an external URL in a new view
/// context. Implemented by the host's tab collaborator.
pub trait ViewOpener: Send + Sync {
    fn open_view(&self, url: &str);
}

/// Asks the user to confirm a destructive action.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Page-load-scoped session state.
#[derive(Debug, Default)]
pub struct Session {
    /// Id of the currently displayed history item, if any.
    pub current_history_id: Option<String>,
}

/// The rendered state of the viewer page.
#[derive(Debug, Clone)]
pub struct PageView {
    pub history_html: String,
    pub content_html: Option<String>,
    pub error: Option<String>,
    pub welcome: bool,
}

impl PageView {
    fn welcome(history_html: String) -> Self {
        Self {
            history_html,
            content_html: None,
            error: None,
            welcome: true,
        }
    }

    fn content(history_html: String, content_html: String) -> Self {
        Self {
            history_html,
            content_html: Some(content_html),
            error: None,
            welcome: false,
        }
    }

    fn error(history_html: String, message: String) -> Self {
        Self {
            history_html,
            content_html: None,
            error: Some(message),
            welcome: false,
        }
    }
}

/// Shared state captured by the route handlers.
struct PageContext {
    store: HistoryStore,
    session: Mutex<Session>,
    opener: Arc<dyn ViewOpener>,
}

impl PageContext {
    async fn render_history(&self) -> String {
        let items = self.store.load().await;
        let current = self.session.lock().await.current_history_id.clone();
        render_history_list(&items, current.as_deref(), Utc::now().timestamp_millis())
    }

    /// Content pane HTML for the current session state.
    async fn current_content_html(&self) -> String {
        let current = self.session.lock().await.current_history_id.clone();
        let Some(id) = current else {
            return render_welcome();
        };
        let items = self.store.load().await;
        match items.iter().find(|item| item.id() == id) {
            Some(HistoryItem::Snippet(snippet)) => {
                render_code_display(&snippet.content, snippet.format)
                    .unwrap_or_else(|e| render_error(&e.to_string()))
            }
            _ => render_welcome(),
        }
    }

    /// First snippet in the list, used as the fallback after deletions.
    async fn first_snippet(&self) -> Option<Snippet> {
        self.store.load().await.into_iter().find_map(|item| match item {
            HistoryItem::Snippet(snippet) => Some(snippet),
            HistoryItem::Link(_) => None,
        })
    }
}

/// Controller wiring the viewer page together.
pub struct PageController {
    ctx: Arc<PageContext>,
    router: Router,
    prompt: Arc<dyn ConfirmPrompt>,
}

impl PageController {
    pub fn new(
        store: HistoryStore,
        opener: Arc<dyn ViewOpener>,
        prompt: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        let ctx = Arc::new(PageContext {
            store,
            session: Mutex::new(Session::default()),
            opener,
        });

        let mut router = Router::new();

        let c = ctx.clone();
        router.register("history.list", move |_payload| {
            let ctx = c.clone();
            async move { Ok(ctx.render_history().await) }
        });

        let c = ctx.clone();
        router.register("history.select", move |payload| {
            let ctx = c.clone();
            async move { select_handler(ctx, payload).await }
        });

        let c = ctx.clone();
        router.register("history.delete", move |payload| {
            let ctx = c.clone();
            async move { delete_handler(ctx, payload).await }
        });

        let c = ctx.clone();
        router.register("history.clear", move |_payload| {
            let ctx = c.clone();
            async move { clear_handler(ctx).await }
        });

        Self { ctx, router, prompt }
    }

    /// The internal router, exposed so the host can feed it declarative
    /// triggers parsed from swapped-in markup.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Startup flow: render history, then consume at most one pending
    /// payload slot — a pending link is saved and the first snippet (or the
    /// welcome state) is shown; a pending snippet is detected, saved, and
    /// displayed. With neither slot occupied the welcome state is shown.
    pub async fn startup(&self) -> PageView {
        if let Some(link) = self.ctx.store.take_pending_link().await {
            self.ctx
                .store
                .append_link(&link.url, &link.title, link.fav_icon_url.as_deref())
                .await;

            if let Some(snippet) = self.ctx.first_snippet().await {
                self.ctx.session.lock().await.current_history_id = Some(snippet.id.clone());
                let history_html = self.render_history().await;
                return match render_code_display(&snippet.content, snippet.format) {
                    Ok(html) => PageView::content(history_html, html),
                    Err(e) => PageView::error(history_html, e.to_string()),
                };
            }
            return PageView::welcome(self.render_history().await);
        }

        if let Some(content) = self.ctx.store.take_pending_snippet().await {
            let format = detect_format(&content);
            if let Some(id) = self.ctx.store.append_snippet(&content, format).await {
                self.ctx.session.lock().await.current_history_id = Some(id);
            }
            let history_html = self.render_history().await;
            return match render_code_display(&content, format) {
                Ok(html) => PageView::content(history_html, html),
                Err(e) => PageView::error(history_html, e.to_string()),
            };
        }

        PageView::welcome(self.render_history().await)
    }

    /// Click on a rendered history item: snippets load into the content
    /// pane, links open in a new view context.
    pub async fn select_item(&self, id: &str) -> PageView {
        let swap = self
            .router
            .handle_trigger(&Trigger {
                endpoint: "history.select".to_string(),
                payload: json!({ "id": id }).to_string(),
                target: "content".to_string(),
            })
            .await;

        let history_html = self.render_history().await;
        match swap {
            Swap::Replace { html, .. } => PageView::content(history_html, html),
            Swap::Discarded => self.view().await,
        }
    }

    /// Delete button on a history item. If the deleted item was the active
    /// one, falls back to the next available snippet or the welcome state.
    pub async fn delete_item(&self, id: &str) -> PageView {
        let swap = self
            .router
            .handle_trigger(&Trigger {
                endpoint: "history.delete".to_string(),
                payload: json!({ "id": id }).to_string(),
                target: "history".to_string(),
            })
            .await;

        let history_html = match swap {
            Swap::Replace { html, .. } => html,
            Swap::Discarded => self.render_history().await,
        };
        self.assemble(history_html).await
    }

    /// "Clear all": after user confirmation, empties the store and resets
    /// to the welcome state. Declining leaves the page unchanged.
    pub async fn clear_all(&self) -> PageView {
        if !self
            .prompt
            .confirm("Are you sure you want to clear all history?")
        {
            return self.view().await;
        }

        let swap = self
            .router
            .handle_trigger(&Trigger {
                endpoint: "history.clear".to_string(),
                payload: String::new(),
                target: "history".to_string(),
            })
            .await;

        let history_html = match swap {
            Swap::Replace { html, .. } => html,
            Swap::Discarded => self.render_history().await,
        };
        self.assemble(history_html).await
    }

    /// Re-renders the full page from the current session state.
    pub async fn view(&self) -> PageView {
        let history_html = self.render_history().await;
        self.assemble(history_html).await
    }

    async fn render_history(&self) -> String {
        match self.router.dispatch("history.list", json!({})).await {
            Ok(html) => html,
            Err(e) => render_error(&e.to_string()),
        }
    }

    async fn assemble(&self, history_html: String) -> PageView {
        let current = self.ctx.session.lock().await.current_history_id.clone();
        if current.is_some() {
            let content = self.ctx.current_content_html().await;
            PageView::content(history_html, content)
        } else {
            PageView::welcome(history_html)
        }
    }
}

async fn select_handler(ctx: Arc<PageContext>, payload: Value) -> Result<String, RouteError> {
    let id = payload
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RouteError::Handler("missing id".to_string()))?;

    let items = ctx.store.load().await;
    let item = items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| RouteError::Handler("History item not found".to_string()))?;

    match item {
        HistoryItem::Snippet(snippet) => {
            let html = render_code_display(&snippet.content, snippet.format)
                .map_err(|e| RouteError::Handler(e.to_string()))?;
            ctx.session.lock().await.current_history_id = Some(snippet.id.clone());
            Ok(html)
        }
        HistoryItem::Link(link) => {
            // Links open in a new view context; the content pane keeps
            // whatever it is currently showing.
            ctx.opener.open_view(&link.url);
            Ok(ctx.current_content_html().await)
        }
    }
}

async fn delete_handler(ctx: Arc<PageContext>, payload: Value) -> Result<String, RouteError> {
    let id = payload
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RouteError::Handler("missing id".to_string()))?;

    let was_active = {
        let session = ctx.session.lock().await;
        session.current_history_id.as_deref() == Some(id)
    };

    if ctx.store.delete_by_id(id).await {
        if was_active {
            let next = ctx.first_snippet().await.map(|snippet| snippet.id);
            ctx.session.lock().await.current_history_id = next;
        }
    } else {
        warn!(id = %id, "history delete did not persist; leaving view unchanged");
    }

    Ok(ctx.render_history().await)
}

async fn clear_handler(ctx: Arc<PageContext>) -> Result<String, RouteError> {
    if ctx.store.clear_all().await {
        ctx.session.lock().await.current_history_id = None;
    } else {
        warn!("history clear did not persist; leaving view unchanged");
    }
    Ok(ctx.render_history().await)
}
