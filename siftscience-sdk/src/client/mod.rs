//! HTTP clients for both Sift API generations.
//!
//! Every operation validates its arguments synchronously and returns a
//! [`PendingRequest`]; nothing touches the network until that request is
//! awaited, given a callback, or dispatched.

mod decisions;
mod dispatch;
mod events;
mod fingerprint;
mod labels;
mod partner;
mod score;

pub use decisions::{DEFAULT_FROM, DEFAULT_LIMIT, Decisions, Workflows};
pub use dispatch::{Augment, Dispatch, Envelope, Operation, PendingRequest, ResponseFuture};
pub use events::Events;
pub use fingerprint::Fingerprint;
pub use partner::Partner;

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::objects::{EventKind, EventType, RawResponse};

/// Callback receiving the raw outcome of one request.
pub type ResponseCallback = Arc<dyn Fn(Result<RawResponse, ClientError>) + Send + Sync>;

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// An argument had the wrong shape. Nothing was sent.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// A payload did not serialize to a JSON object. Nothing was sent.
    #[error("payload must be a JSON object, got {found}")]
    InvalidPayload { found: &'static str },

    /// The event name is neither built in nor a registered custom event.
    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    /// A callback delivery was requested outside a Tokio runtime. Nothing
    /// was sent.
    #[error("no tokio runtime: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),

    /// The response carried no usable body. The raw response is kept for
    /// diagnosis.
    #[error("an unexpected error has occurred (http status {})", .response.status)]
    Unexpected { response: Box<RawResponse> },
}

/// Client for the Sift APIs. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SiftClient {
    http: Client,
    config: Arc<ClientConfig>,
    event_kinds: Arc<HashMap<String, EventKind>>,
}

impl SiftClient {
    /// Create a client. Custom events registered in `config` become
    /// available through [`events`](Self::events).
    pub fn new(config: ClientConfig) -> Self {
        let mut event_kinds = HashMap::new();
        for event in EventType::ALL {
            event_kinds.insert(event.name().to_owned(), EventKind::Builtin(event));
        }
        for name in config.custom_events() {
            event_kinds
                .entry(name.clone())
                .or_insert_with(|| EventKind::Custom(name.clone()));
        }

        Self {
            http: Client::new(),
            config: Arc::new(config),
            event_kinds: Arc::new(event_kinds),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Event submission (`POST events`).
    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    /// Decision listing, application and status (v3).
    pub fn decisions(&self) -> Decisions<'_> {
        Decisions::new(self)
    }

    /// Workflow run status (v3).
    pub fn workflows(&self) -> Workflows<'_> {
        Workflows::new(self)
    }

    /// Device fingerprinting (v3).
    pub fn fingerprint(&self) -> Fingerprint<'_> {
        Fingerprint::new(self)
    }

    /// Partner account management (v3).
    pub fn partner(&self) -> Partner<'_> {
        Partner::new(self)
    }

    pub(crate) fn prepare(&self, operation: Operation) -> PendingRequest {
        PendingRequest::new(self.http.clone(), &self.config, operation)
    }

    pub(crate) fn event_kind(&self, name: &str) -> Option<&EventKind> {
        self.event_kinds.get(name)
    }

    pub(crate) fn event_names(&self) -> impl Iterator<Item = &str> {
        self.event_kinds.keys().map(String::as_str)
    }

    /// Operation against the v20x API.
    pub(crate) fn v2(&self, method: Method, path: &str) -> Result<Operation, ClientError> {
        let url = self.config.api_url().join(path)?;
        Ok(Operation::new(method, url))
    }

    /// Operation against the v3 API, with basic-auth credentials.
    pub(crate) fn v3(&self, method: Method, path: &str) -> Result<Operation, ClientError> {
        let url = self.config.api3_url().join(path)?;
        Ok(Operation::new(method, url)
            .header(AUTHORIZATION, self.basic_auth()?)
            .envelope(Envelope::Object))
    }

    fn basic_auth(&self) -> Result<HeaderValue, ClientError> {
        let encoded = fast32::base64::RFC4648.encode(self.config.api_key().as_bytes());
        let mut value = HeaderValue::try_from(format!("Basic {encoded}")).map_err(|_| {
            ClientError::InvalidArgument {
                name: "api_key",
                reason: "cannot be sent in a header",
            }
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Encoded account id path segment.
    ///
    /// A missing account id is a caller precondition, not a local error: the
    /// request goes out with an empty segment and the service rejects it.
    pub(crate) fn account_segment(&self) -> String {
        configured_segment("account_id", self.config.account_id())
    }

    /// Encoded partner id path segment. Same contract as
    /// [`account_segment`](Self::account_segment).
    pub(crate) fn partner_segment(&self) -> String {
        configured_segment("partner_id", self.config.partner_id())
    }
}

fn configured_segment(name: &'static str, value: Option<&str>) -> String {
    match value {
        Some(id) => urlencoding::encode(id).into_owned(),
        None => {
            tracing::warn!(field = name, "Identifier not configured; the service will reject this request");
            String::new()
        }
    }
}

/// Validate an id argument and encode it as a path segment.
pub(crate) fn segment(name: &'static str, value: &str) -> Result<String, ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidArgument {
            name,
            reason: "must not be blank",
        });
    }
    if is_dot_segment(value) {
        return Err(ClientError::InvalidArgument {
            name,
            reason: "must not be a dot segment",
        });
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// `.` and `..` survive percent-encoding and are collapsed by URL joining.
pub(crate) fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}

/// Serialize a caller payload into a fresh JSON object.
///
/// The caller's value is only borrowed, so stamping fields onto the result
/// never affects it.
pub(crate) fn object_payload<T: Serialize + ?Sized>(
    payload: &T,
) -> Result<Map<String, Value>, ClientError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::InvalidPayload {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
