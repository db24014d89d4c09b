//! Conversions from handler outcomes to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use siftscience_sdk::webhook::{WebhookError, WebhookResponse};

/// The response the handlers built, ready to send.
#[derive(Debug)]
pub struct WebhookReply(pub WebhookResponse);

impl IntoResponse for WebhookReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status()).unwrap_or_else(|_| {
            tracing::warn!(status = self.0.status(), "Webhook handler set an invalid status");
            StatusCode::INTERNAL_SERVER_ERROR
        });
        match self.0.body() {
            Some(body) => (status, Json(body.clone())).into_response(),
            None => status.into_response(),
        }
    }
}

/// A handler failed while processing the webhook.
#[derive(Debug)]
pub struct WebhookFailure(pub WebhookError);

impl From<WebhookError> for WebhookFailure {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookFailure {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Webhook handler failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "webhook handler failed").into_response()
    }
}
