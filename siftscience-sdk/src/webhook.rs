//! Routing of inbound webhook notifications to registered handlers.
//!
//! Handlers are keyed by the `action.id` of the notification. A handler
//! registered under [`ALL_ACTIONS`] sees every notification and always runs
//! first; the handler for the specific action runs second. Both run
//! sequentially inside the single inbound call.
//!
//! This module does not depend on any HTTP framework. The
//! `siftscience-webhook` crate adapts it to axum.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::objects::webhook::{WebhookPayload, action_id};
use crate::signature::SignatureError;

/// Action id of the catch-all handler.
pub const ALL_ACTIONS: &str = "all";

/// Errors produced while dispatching a webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// A registered handler returned an error.
    #[error("webhook handler for action `{action}` failed: {error}")]
    Handler { action: String, error: anyhow::Error },

    /// The body was not valid JSON.
    #[error("invalid webhook body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The signature header was missing, malformed or did not match.
    #[error("webhook signature rejected: {0}")]
    Signature(#[from] SignatureError),
}

/// An inbound webhook call as seen by handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookRequest {
    headers: BTreeMap<String, String>,
    body: Value,
}

impl WebhookRequest {
    pub fn new(body: Value) -> Self {
        Self {
            headers: BTreeMap::new(),
            body,
        }
    }

    /// Attach a request header. Names are stored lowercased.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// `action.id` of the notification, if present.
    pub fn action_id(&self) -> Option<&str> {
        action_id(&self.body)
    }

    /// Typed view of the body.
    pub fn payload(&self) -> Result<WebhookPayload, serde_json::Error> {
        WebhookPayload::deserialize(&self.body)
    }
}

/// The response handlers build up. Defaults to `200` with no body.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    status: u16,
    body: Option<Value>,
}

impl Default for WebhookResponse {
    fn default() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }
}

impl WebhookResponse {
    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn json(&mut self, body: Value) -> &mut Self {
        self.body = Some(body);
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Completion callback handed to every handler.
///
/// The only way to produce the [`Completed`] a handler must return is to
/// call [`Done::finish`], so a handler cannot return without signalling
/// completion.
#[derive(Debug)]
pub struct Done {
    _private: (),
}

impl Done {
    fn new() -> Self {
        Self { _private: () }
    }

    pub fn finish(self) -> Completed {
        Completed { _private: () }
    }
}

/// Proof that a handler invoked its [`Done`] callback.
#[derive(Debug)]
pub struct Completed {
    _private: (),
}

/// A webhook handler.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    async fn handle(
        &self,
        request: &WebhookRequest,
        response: &mut WebhookResponse,
        done: Done,
    ) -> anyhow::Result<Completed>;
}

/// Adapter returned by [`handler_fn`].
pub struct HandlerFn<F>(F);

/// Wrap a synchronous closure as a [`WebhookHandler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&WebhookRequest, &mut WebhookResponse, Done) -> Completed + Send + Sync + 'static,
{
    HandlerFn(f)
}

#[async_trait]
impl<F> WebhookHandler for HandlerFn<F>
where
    F: Fn(&WebhookRequest, &mut WebhookResponse, Done) -> Completed + Send + Sync + 'static,
{
    async fn handle(
        &self,
        request: &WebhookRequest,
        response: &mut WebhookResponse,
        done: Done,
    ) -> anyhow::Result<Completed> {
        Ok((self.0)(request, response, done))
    }
}

/// Immutable map of action id to handler. Cheap to clone.
#[derive(Clone, Default)]
pub struct WebhookRegistry {
    handlers: Arc<HashMap<String, Arc<dyn WebhookHandler>>>,
}

impl std::fmt::Debug for WebhookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut actions: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        actions.sort_unstable();
        f.debug_struct("WebhookRegistry")
            .field("actions", &actions)
            .finish()
    }
}

impl WebhookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `action`, replacing any earlier registration.
    pub fn with_handler(
        mut self,
        action: impl Into<String>,
        handler: impl WebhookHandler + 'static,
    ) -> Self {
        Arc::make_mut(&mut self.handlers).insert(action.into(), Arc::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Run the catch-all handler, then the handler for the request's action.
    pub async fn dispatch(&self, request: &WebhookRequest) -> Result<WebhookResponse, WebhookError> {
        let mut response = WebhookResponse::default();
        let action = request.action_id();
        tracing::debug!(action_id = action.unwrap_or("<none>"), "Dispatching webhook");

        if let Some(handler) = self.handlers.get(ALL_ACTIONS) {
            run(handler.as_ref(), ALL_ACTIONS, request, &mut response).await?;
        }

        if let Some(id) = action.filter(|id| *id != ALL_ACTIONS) {
            match self.handlers.get(id) {
                Some(handler) => run(handler.as_ref(), id, request, &mut response).await?,
                None => tracing::warn!(action_id = id, "No webhook handler registered for action"),
            }
        }

        Ok(response)
    }
}

async fn run(
    handler: &dyn WebhookHandler,
    action: &str,
    request: &WebhookRequest,
    response: &mut WebhookResponse,
) -> Result<(), WebhookError> {
    handler
        .handle(request, response, Done::new())
        .await
        .map(|_completed| ())
        .map_err(|error| WebhookError::Handler {
            action: action.to_owned(),
            error,
        })
}
