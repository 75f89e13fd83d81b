//! Request router for SnipStash.
//!
//! Models a same-process request/response cycle without a network
//! transport. UI markup declares an endpoint and a JSON payload via
//! `data-endpoint` / `data-payload` attributes; on activation the host
//! builds a [`Trigger`] and hands it to [`Router::handle_trigger`], which
//! dispatches to the registered handler and returns the swap to apply to
//! the target element.
//!
//! Overlapping dispatches to the same target are sequenced with a
//! per-target monotonic token: a response is applied only if its token is
//! still the latest issued for that target, otherwise it is discarded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::warn;

use crate::services::renderer::render_error;
use crate::types::errors::RouteError;

type Handler = Box<dyn Fn(Value) -> BoxFuture<'static, Result<String, RouteError>> + Send + Sync>;

/// A UI-triggered request parsed from an element's declarative attributes.
#[derive(Debug, Clone)]
pub struct Trigger {
    /// Endpoint name from the `data-endpoint` attribute.
    pub endpoint: String,
    /// Raw JSON payload text from the `data-payload` attribute.
    pub payload: String,
    /// Identifier of the element whose content the response replaces.
    pub target: String,
}

/// The DOM mutation a completed dispatch asks the host to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Swap {
    /// Replace the target element's content with the given HTML, then
    /// re-activate routing on the inserted subtree.
    Replace { target: String, html: String },
    /// A newer dispatch for the same target superseded this one.
    Discarded,
}

/// Endpoint registry and dispatcher.
#[derive(Default)]
pub struct Router {
    routes: HashMap<String, Handler>,
    tokens: Mutex<HashMap<String, u64>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates an endpoint name with a handler.
    ///
    /// The last registration for a given name wins.
    pub fn register<F, Fut>(&mut self, endpoint: &str, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, RouteError>> + Send + 'static,
    {
        self.routes
            .insert(endpoint.to_string(), Box::new(move |payload| handler(payload).boxed()));
    }

    /// Looks up the handler for the endpoint and awaits it, returning its
    /// result verbatim. Never panics: an unregistered endpoint yields
    /// `RouteError::UnknownEndpoint`.
    pub async fn dispatch(&self, endpoint: &str, payload: Value) -> Result<String, RouteError> {
        match self.routes.get(endpoint) {
            Some(handler) => handler(payload).await,
            None => Err(RouteError::UnknownEndpoint(endpoint.to_string())),
        }
    }

    /// Issues the next request token for a target.
    fn issue_token(&self, target: &str) -> u64 {
        let mut tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        let token = tokens.entry(target.to_string()).or_insert(0);
        *token += 1;
        *token
    }

    fn is_current(&self, target: &str, token: u64) -> bool {
        let tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        tokens.get(target).copied() == Some(token)
    }

    /// Runs one full request/response cycle for a declarative trigger.
    ///
    /// A malformed payload attribute degrades to an empty payload object.
    /// Handler failures are rendered as an inline error fragment; no error
    /// escapes to the caller.
    pub async fn handle_trigger(&self, trigger: &Trigger) -> Swap {
        let payload = parse_payload(&trigger.endpoint, &trigger.payload);
        let token = self.issue_token(&trigger.target);

        let result = self.dispatch(&trigger.endpoint, payload).await;

        if !self.is_current(&trigger.target, token) {
            return Swap::Discarded;
        }

        match result {
            Ok(html) => Swap::Replace {
                target: trigger.target.clone(),
                html,
            },
            Err(e) => {
                warn!(endpoint = %trigger.endpoint, "request failed: {}", e);
                Swap::Replace {
                    target: trigger.target.clone(),
                    html: render_error(&e.to_string()),
                }
            }
        }
    }
}

fn parse_payload(endpoint: &str, raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(Default::default());
    }
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(endpoint = %endpoint, "malformed payload attribute, using empty payload: {}", e);
            Value::Object(Default::default())
        }
    }
}
