//! SnipStash — capture, format, and stash JSON/XML snippets and saved links.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod controller;
pub mod managers;
pub mod router;
pub mod services;
pub mod storage;
pub mod types;
