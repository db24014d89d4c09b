//! Axum adapter for Sift Science webhooks.
//!
//! Mount [`endpoint`] at any path; each `POST` is verified (when the
//! configuration carries a webhook signature key), parsed, and run through
//! the handlers registered on the [`ClientConfig`]: the `all` handler first,
//! then the handler for the notification's `action.id`.
//!
//! ```ignore
//! use siftscience_sdk::ClientConfig;
//! use siftscience_sdk::webhook::handler_fn;
//!
//! let config = ClientConfig::builder(api_key)
//!     .webhook_signature_key(webhook_key)
//!     .webhook("all", handler_fn(|req, _res, done| {
//!         tracing::info!(action = ?req.action_id(), "Sift webhook");
//!         done.finish()
//!     }))
//!     .build()?;
//!
//! let app = axum::Router::new().route("/sift", siftscience_webhook::endpoint(&config));
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod extractors;
pub mod response;
pub mod state;

use axum::{
    Router,
    extract::State,
    routing::{MethodRouter, post},
};
use siftscience_sdk::ClientConfig;

use crate::extractors::VerifiedPayload;
use crate::response::{WebhookFailure, WebhookReply};
use crate::state::WebhookState;

/// A `POST` route serving the webhooks registered on `config`.
pub fn endpoint<S>(config: &ClientConfig) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    endpoint_with_state(WebhookState::from_config(config))
}

/// Like [`endpoint`] for a hand-built [`WebhookState`].
pub fn endpoint_with_state<S>(state: WebhookState) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    post(handle_webhook).with_state(state)
}

/// A router serving the webhooks registered on `config` at `path`.
pub fn router(path: &str, config: &ClientConfig) -> Router {
    Router::new().route(path, endpoint(config))
}

async fn handle_webhook(
    State(state): State<WebhookState>,
    VerifiedPayload(request): VerifiedPayload,
) -> Result<WebhookReply, WebhookFailure> {
    let response = state.registry.dispatch(&request).await?;
    Ok(WebhookReply(response))
}
