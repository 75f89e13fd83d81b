use std::fmt;

// === FormatError ===

/// Errors raised when pretty-printing a captured payload.
#[derive(Debug)]
pub enum FormatError {
    /// The input could not be parsed as JSON.
    InvalidJson(String),
    /// The input could not be parsed as XML.
    InvalidXml(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidJson(msg) => write!(f, "Invalid JSON: {}", msg),
            FormatError::InvalidXml(msg) => write!(f, "Invalid XML: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

// === StorageError ===

/// Errors related to the key-value storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// The backing store rejected a read or write.
    Backend(String),
    /// A stored value could not be serialized or deserialized.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend(msg) => write!(f, "Storage backend error: {}", msg),
            StorageError::Serialization(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === RouteError ===

/// Errors produced while dispatching a UI-triggered request.
#[derive(Debug)]
pub enum RouteError {
    /// No handler is registered for the endpoint.
    UnknownEndpoint(String),
    /// A registered handler failed.
    Handler(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownEndpoint(endpoint) => {
                write!(f, "Unknown endpoint: {}", endpoint)
            }
            RouteError::Handler(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RouteError {}

// === RenderError ===

/// Errors raised while rendering a history item to HTML.
#[derive(Debug)]
pub enum RenderError {
    /// A link item carries a URL that cannot be parsed.
    InvalidUrl(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
        }
    }
}

impl std::error::Error for RenderError {}
