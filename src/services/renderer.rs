//! View rendering for SnipStash.
//!
//! Pure functions turning history items and formatted content into HTML
//! fragments. No DOM access; every interpolated user-controlled field goes
//! through [`escape_html`]. Fragments carry `data-endpoint` / `data-payload`
//! attributes so the request router can wire them up declaratively.

use chrono::{TimeZone, Utc};
use tracing::warn;
use url::Url;

use super::json_formatter::format_json;
use super::xml_formatter::format_xml;
use crate::types::errors::{FormatError, RenderError};
use crate::types::history::{HistoryItem, Link, PayloadFormat, Snippet};

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_WEEK: i64 = 604_800_000;

const DELETE_ICON: &str = r#"<svg width="12" height="12" viewBox="0 0 16 16" fill="currentColor"><path d="M3.72 3.72a.75.75 0 011.06 0L8 6.94l3.22-3.22a.75.75 0 111.06 1.06L9.06 8l3.22 3.22a.75.75 0 11-1.06 1.06L8 9.06l-3.22 3.22a.75.75 0 01-1.06-1.06L6.94 8 3.72 4.78a.75.75 0 010-1.06z"></path></svg>"#;

/// Escapes text for safe interpolation into HTML markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Buckets elapsed time since `timestamp_ms` into a relative label.
///
/// Half-open buckets: under a minute is "Just now", then minutes, hours,
/// and days; anything a week old or older becomes an abbreviated calendar
/// date (month + day, no year).
pub fn format_timestamp(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms - timestamp_ms;

    if diff < MILLIS_PER_MINUTE {
        return "Just now".to_string();
    }
    if diff < MILLIS_PER_HOUR {
        return format!("{}m ago", diff / MILLIS_PER_MINUTE);
    }
    if diff < MILLIS_PER_DAY {
        return format!("{}h ago", diff / MILLIS_PER_HOUR);
    }
    if diff < MILLIS_PER_WEEK {
        return format!("{}d ago", diff / MILLIS_PER_DAY);
    }

    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(date) => date.format("%b %-d").to_string(),
        None => "Unknown".to_string(),
    }
}

/// Renders a snippet history entry.
///
/// Carries the active marker class when `is_active`, a delete affordance
/// with the item's id, the relative time label, and a format badge.
pub fn render_snippet_fragment(item: &Snippet, is_active: bool, now_ms: i64) -> String {
    let active_class = if is_active { " active" } else { "" };
    let id = escape_html(&item.id);
    format!(
        concat!(
            r#"<div class="history-item{active}" data-id="{id}" data-type="snippet" "#,
            r#"data-endpoint="history.select" data-payload="{payload}">"#,
            r#"<div class="history-item-header">"#,
            r#"<span class="history-item-time">{time}</span>"#,
            r#"<span class="history-item-format {format}">{label}</span>"#,
            r#"<button class="delete-history-btn" data-id="{id}" "#,
            r#"data-endpoint="history.delete" data-payload="{payload}" title="Delete">{icon}</button>"#,
            r#"</div></div>"#
        ),
        active = active_class,
        id = id,
        payload = escape_html(&payload_attr(&item.id)),
        time = format_timestamp(item.timestamp, now_ms),
        format = item.format.as_str(),
        label = item.format.label(),
        icon = DELETE_ICON,
    )
}

/// Renders a link history entry with its title (falling back to the url)
/// and the url's hostname.
///
/// # Errors
/// Returns `RenderError::InvalidUrl` when the stored url cannot be parsed.
/// The caller decides whether to skip the item or surface the error.
pub fn render_link_fragment(item: &Link, now_ms: i64) -> Result<String, RenderError> {
    let parsed =
        Url::parse(&item.url).map_err(|_| RenderError::InvalidUrl(item.url.clone()))?;
    let domain = parsed.host_str().unwrap_or_default();
    let title = if item.title.is_empty() {
        &item.url
    } else {
        &item.title
    };

    Ok(format!(
        concat!(
            r#"<div class="history-item history-item-link" data-id="{id}" data-type="link" "#,
            r#"data-url="{url}" data-endpoint="history.select" data-payload="{payload}">"#,
            r#"<div class="history-item-header">"#,
            r#"<span class="history-item-time">{time}</span>"#,
            r#"<span class="history-item-format link">LINK</span>"#,
            r#"<button class="delete-history-btn" data-id="{id}" "#,
            r#"data-endpoint="history.delete" data-payload="{payload}" title="Delete">{icon}</button>"#,
            r#"</div>"#,
            r#"<div class="history-item-content">"#,
            r#"<div class="link-title">{title}</div>"#,
            r#"<div class="link-domain">{domain}</div>"#,
            r#"</div></div>"#
        ),
        id = escape_html(&item.id),
        url = escape_html(&item.url),
        payload = escape_html(&payload_attr(&item.id)),
        time = format_timestamp(item.timestamp, now_ms),
        title = escape_html(title),
        domain = escape_html(domain),
        icon = DELETE_ICON,
    ))
}

/// Renders the complete history list, newest first.
///
/// Returns empty-state markup when there are no items. A link entry whose
/// url fails to parse is skipped with a warning so one bad entry cannot
/// blank the whole list.
pub fn render_history_list(
    items: &[HistoryItem],
    current_id: Option<&str>,
    now_ms: i64,
) -> String {
    if items.is_empty() {
        return r#"<div class="history-empty">No history yet</div>"#.to_string();
    }

    let mut out = String::new();
    for item in items {
        match item {
            HistoryItem::Snippet(snippet) => {
                let is_active = current_id == Some(snippet.id.as_str());
                out.push_str(&render_snippet_fragment(snippet, is_active, now_ms));
            }
            HistoryItem::Link(link) => match render_link_fragment(link, now_ms) {
                Ok(html) => out.push_str(&html),
                Err(e) => warn!(id = %link.id, "skipping unrenderable link entry: {}", e),
            },
        }
    }
    out
}

/// Pretty-prints the content with the matching formatter and wraps it in a
/// highlighted-code container tagged with the target language.
///
/// # Errors
/// Propagates the formatter's `FormatError` when the content is malformed.
pub fn render_code_display(content: &str, format: PayloadFormat) -> Result<String, FormatError> {
    let formatted = match format {
        PayloadFormat::Json => format_json(content)?,
        PayloadFormat::Xml => format_xml(content)?,
    };

    Ok(format!(
        concat!(
            r#"<div class="code-container">"#,
            r#"<span class="format-badge {format}-badge">{label}</span>"#,
            r#"<pre><code class="language-{format}">{code}</code></pre>"#,
            r#"</div>"#
        ),
        format = format.as_str(),
        label = format.label(),
        code = escape_html(&formatted),
    ))
}

/// Welcome / empty-state markup shown when nothing is displayed.
pub fn render_welcome() -> String {
    concat!(
        r#"<div class="welcome-screen">"#,
        r#"<h1>SnipStash</h1>"#,
        r#"<p>Select JSON or XML text on any page and choose "Format and Open" to get started.</p>"#,
        r#"</div>"#
    )
    .to_string()
}

/// Inline error fragment shown in place of content.
pub fn render_error(message: &str) -> String {
    format!(r#"<div class="error">Error: {}</div>"#, escape_html(message))
}

fn payload_attr(id: &str) -> String {
    serde_json::json!({ "id": id }).to_string()
}
