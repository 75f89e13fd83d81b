use serde::{Deserialize, Serialize};

/// Classification of a captured text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    Json,
    Xml,
}

impl PayloadFormat {
    /// Lower-case literal used in storage and language classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadFormat::Json => "json",
            PayloadFormat::Xml => "xml",
        }
    }

    /// Upper-case label shown on format badges.
    pub fn label(&self) -> &'static str {
        match self {
            PayloadFormat::Json => "JSON",
            PayloadFormat::Xml => "XML",
        }
    }
}

/// A captured, formatted text record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub content: String,
    pub format: PayloadFormat,
    pub timestamp: i64,
}

/// A captured bookmark-like record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(rename = "favIconUrl")]
    pub fav_icon_url: Option<String>,
    pub timestamp: i64,
}

/// A single entry in the persisted history list.
///
/// Serialized with a `type` tag (`"snippet"` or `"link"`) so the stored
/// JSON matches the shape written by earlier versions of the extension.
/// The list is ordered newest first; ids are unique across the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryItem {
    Snippet(Snippet),
    Link(Link),
}

impl HistoryItem {
    pub fn id(&self) -> &str {
        match self {
            HistoryItem::Snippet(s) => &s.id,
            HistoryItem::Link(l) => &l.id,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            HistoryItem::Snippet(s) => s.timestamp,
            HistoryItem::Link(l) => l.timestamp,
        }
    }

    pub fn is_snippet(&self) -> bool {
        matches!(self, HistoryItem::Snippet(_))
    }
}

/// Transient link payload handed from the capture trigger to the next
/// viewer page load via the pending-link storage slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLink {
    pub url: String,
    pub title: String,
    #[serde(rename = "favIconUrl")]
    pub fav_icon_url: Option<String>,
}
