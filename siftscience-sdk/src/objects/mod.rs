//! Request and response shapes shared by the clients and webhook code.

pub mod event;
pub mod webhook;

pub use event::{EventKind, EventType};
pub use webhook::{WebhookAction, WebhookPayload};

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::status_message;

/// A decoded response body from either API generation.
///
/// The body is kept opaque. v20x endpoints answer with an envelope carrying a
/// numeric `status` and `error_message`; v3 endpoints answer with a resource
/// object, or `{ "error": ..., "description": ... }` on failure. A non-zero
/// `status` is **not** turned into an error: inspect [`status`](Self::status)
/// or [`is_success`](Self::is_success).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiftResponse {
    body: Value,
}

impl SiftResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Numeric `status` of a v20x envelope.
    pub fn status(&self) -> Option<i64> {
        self.body.get("status").and_then(Value::as_i64)
    }

    /// Catalog description of [`status`](Self::status).
    pub fn status_message(&self) -> Option<&'static str> {
        self.status().and_then(status_message)
    }

    /// `error_message` of a v20x envelope.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error_message").and_then(Value::as_str)
    }

    /// `error` code of a v3 failure response.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// `description` of a v3 failure response.
    pub fn description(&self) -> Option<&str> {
        self.body.get("description").and_then(Value::as_str)
    }

    /// `true` when the envelope status is `0`, or when a v3 body carries no
    /// `error` field.
    pub fn is_success(&self) -> bool {
        match self.status() {
            Some(code) => code == 0,
            None => self.error().is_none(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Deserialize the body into a caller-defined type.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}

/// The undecoded outcome of one HTTP exchange, as handed to callbacks.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status line code. Informational only: the services report
    /// failures in the body.
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub bytes: Bytes,
    /// The body parsed as JSON, if it was non-empty valid JSON.
    pub body: Option<Value>,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, bytes: Bytes) -> Self {
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };
        Self {
            status,
            headers,
            bytes,
            body,
        }
    }
}
