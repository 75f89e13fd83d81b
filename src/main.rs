//! SnipStash demo mode.
//!
//! Walks the capture → detect → format → history pipeline end to end
//! against a temporary SQLite store and prints the rendered fragments.

use std::sync::Arc;

use snipstash::app::{App, AutoConfirm, LoggingOpener};
use snipstash::storage::SqliteStorage;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("SnipStash v{} — Demo Mode", env!("CARGO_PKG_VERSION"));
    println!();

    let db_path = std::env::temp_dir().join("snipstash-demo.db");
    let storage = Arc::new(SqliteStorage::open(&db_path)?);
    println!("Database: {}", db_path.display());
    let app = App::new(storage, Arc::new(LoggingOpener), Arc::new(AutoConfirm));

    section("Capture a JSON selection");
    app.capture_selection(r#"{"name":"snipstash","tags":["json","xml"]}"#)
        .await;
    let view = app.controller().startup().await;
    println!("{}", view.content_html.as_deref().unwrap_or("(no content)"));

    section("Capture an XML selection");
    app.capture_selection("<feed><entry id=\"1\">hello</entry></feed>")
        .await;
    let view = app.controller().startup().await;
    println!("{}", view.content_html.as_deref().unwrap_or("(no content)"));

    section("Save a link");
    app.capture_link("https://example.com/page", "Example page", None)
        .await;
    let view = app.controller().startup().await;
    println!("{}", view.history_html);

    section("Clear history");
    let view = app.controller().clear_all().await;
    println!("{}", view.history_html);

    Ok(())
}
