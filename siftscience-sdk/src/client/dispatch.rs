//! Request descriptors and the single place requests are sent from.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use tokio::runtime::Handle;
use url::Url;

use super::{ClientError, ResponseCallback};
use crate::config::ClientConfig;
use crate::constants::AbuseType;
use crate::objects::{RawResponse, SiftResponse};

/// Boxed future resolving to a normalized response.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<SiftResponse, ClientError>> + Send>>;

/// What a response body must look like to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// v20x envelope: a JSON object with a numeric `status`.
    Status,
    /// v3 resource: any JSON object.
    Object,
    /// Like [`Status`](Self::Status), but an empty body with a 2xx status
    /// line is also accepted.
    StatusOrEmpty,
}

/// Config-driven query parameters added before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Augment {
    None,
    /// Event submissions: `return_*` flags and `abuse_types`.
    Event,
    /// Score lookups: `abuse_types` only.
    Score,
}

/// A fully described HTTP request.
#[derive(Debug, Clone)]
pub struct Operation {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Value>,
    envelope: Envelope,
    augment: Augment,
}

impl Operation {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            envelope: Envelope::Status,
            augment: Augment::None,
        }
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn augment(mut self, augment: Augment) -> Self {
        self.augment = augment;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn envelope_kind(&self) -> Envelope {
        self.envelope
    }

    /// First value of query parameter `key`.
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn append_missing(&mut self, key: &str, value: &str) {
        if self.query_value(key).is_none() {
            self.url.query_pairs_mut().append_pair(key, value);
        }
    }

    /// Apply defaults from `config`. Parameters already present are kept.
    fn prepare(mut self, config: &ClientConfig) -> Self {
        if !self.headers.contains_key(CONTENT_TYPE) {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if self.augment == Augment::Event {
            let flags = [
                ("return_action", config.return_action()),
                ("return_score", config.return_score()),
                ("return_workflow_status", config.return_workflow_status()),
            ];
            for (key, enabled) in flags {
                if enabled {
                    self.append_missing(key, "true");
                }
            }
        }

        if self.augment != Augment::None && !config.abuse_types().is_empty() {
            self.append_missing("abuse_types", &AbuseType::join(config.abuse_types()));
        }

        self
    }
}

/// A prepared request that has not been sent yet.
///
/// Pick exactly one way to deliver it:
///
/// - `.await` it (or call [`send`](Self::send)) for a normalized
///   [`SiftResponse`];
/// - hand it a per-call callback with [`call`](Self::call);
/// - [`dispatch`](Self::dispatch) it, which uses the configured global
///   callback when there is one.
///
/// Dropping it sends nothing.
#[must_use = "requests do nothing unless awaited, called or dispatched"]
pub struct PendingRequest {
    http: Client,
    global_callback: Option<ResponseCallback>,
    operation: Operation,
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("operation", &self.operation)
            .field("global_callback", &self.global_callback.is_some())
            .finish()
    }
}

impl PendingRequest {
    pub(crate) fn new(http: Client, config: &ClientConfig, operation: Operation) -> Self {
        Self {
            http,
            global_callback: config.global_callback().cloned(),
            operation: operation.prepare(config),
        }
    }

    /// The request exactly as it will be sent.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Send the request and normalize the response.
    ///
    /// Transport failures and malformed bodies are errors. A well-formed
    /// envelope always resolves, whatever its `status` or the HTTP status.
    pub async fn send(self) -> Result<SiftResponse, ClientError> {
        let envelope = self.operation.envelope;
        let raw = execute(&self.http, self.operation).await?;
        normalize(raw, envelope)
    }

    /// Send on a background task and hand the raw outcome to `callback`.
    ///
    /// Outside a Tokio runtime nothing is sent and `callback` receives
    /// [`ClientError::Runtime`] before this returns.
    pub fn call<F>(self, callback: F)
    where
        F: FnOnce(Result<RawResponse, ClientError>) + Send + 'static,
    {
        let Self { http, operation, .. } = self;
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    callback(execute(&http, operation).await);
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "No Tokio runtime; Sift request not sent");
                callback(Err(ClientError::Runtime(err)));
            }
        }
    }

    /// Deliver to the global callback if one is configured, otherwise return
    /// the response future.
    ///
    /// Delivery goes through [`call`](Self::call), so the runtime rule there
    /// applies to the global callback too.
    pub fn dispatch(mut self) -> Dispatch {
        match self.global_callback.take() {
            Some(callback) => {
                self.call(move |result| callback(result));
                Dispatch::Delivered
            }
            None => Dispatch::Pending(Box::pin(self.send())),
        }
    }
}

impl IntoFuture for PendingRequest {
    type Output = Result<SiftResponse, ClientError>;
    type IntoFuture = ResponseFuture;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

/// Outcome of [`PendingRequest::dispatch`].
pub enum Dispatch {
    /// The response goes to the global callback.
    Delivered,
    /// No global callback is configured; await this for the response.
    Pending(ResponseFuture),
}

impl Dispatch {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// The response future, if the response was not delivered to a callback.
    pub fn pending(self) -> Option<ResponseFuture> {
        match self {
            Self::Delivered => None,
            Self::Pending(future) => Some(future),
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => f.write_str("Delivered"),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

async fn execute(http: &Client, operation: Operation) -> Result<RawResponse, ClientError> {
    let Operation {
        method,
        url,
        headers,
        body,
        ..
    } = operation;
    tracing::debug!(method = %method, path = url.path(), "Sending Sift request");

    let mut request = http.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.body(serde_json::to_vec(&body)?);
    }

    let response = request.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.bytes().await?;
    tracing::debug!(http_status = status.as_u16(), "Received Sift response");

    Ok(RawResponse::new(status, headers, bytes))
}

/// Turn a raw response into a [`SiftResponse`] if its body has the expected
/// shape. The HTTP status is ignored except for empty bodies.
pub(crate) fn normalize(mut raw: RawResponse, envelope: Envelope) -> Result<SiftResponse, ClientError> {
    match raw.body.take() {
        Some(body) if is_well_formed(&body, envelope) => Ok(SiftResponse::new(body)),
        None if envelope == Envelope::StatusOrEmpty
            && raw.bytes.is_empty()
            && raw.status.is_success() =>
        {
            Ok(SiftResponse::new(Value::Null))
        }
        body => {
            raw.body = body;
            tracing::warn!(
                http_status = raw.status.as_u16(),
                body_len = raw.bytes.len(),
                "Malformed Sift response"
            );
            Err(ClientError::Unexpected {
                response: Box::new(raw),
            })
        }
    }
}

fn is_well_formed(body: &Value, envelope: Envelope) -> bool {
    match (body, envelope) {
        (Value::Object(map), Envelope::Status | Envelope::StatusOrEmpty) => {
            map.get("status").is_some_and(Value::is_number)
        }
        (Value::Object(_), Envelope::Object) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::StatusCode;
    use serde_json::json;

    fn raw(status: StatusCode, body: &'static [u8]) -> RawResponse {
        RawResponse::new(status, HeaderMap::new(), Bytes::from_static(body))
    }

    fn operation() -> Operation {
        Operation::new(
            Method::POST,
            Url::parse("https://api.siftscience.com/v205/events").unwrap(),
        )
    }

    #[test]
    fn status_envelope_resolves_regardless_of_http_status() {
        let response = normalize(
            raw(StatusCode::BAD_REQUEST, br#"{"status":51,"error_message":"Invalid API key"}"#),
            Envelope::Status,
        )
        .unwrap();
        assert_eq!(response.status(), Some(51));
        assert_eq!(response.status_message(), Some("Invalid API key"));
    }

    #[test]
    fn status_envelope_requires_numeric_status() {
        let bodies: [&[u8]; 5] = [
            br#"{"error_message":"OK"}"#,
            br#"{"status":"0"}"#,
            br#"[1,2]"#,
            b"<html>bad gateway</html>",
            b"",
        ];
        for body in bodies {
            let err = normalize(raw(StatusCode::OK, body), Envelope::Status).unwrap_err();
            let ClientError::Unexpected { response } = err else {
                panic!("expected unexpected-response error");
            };
            assert_eq!(response.bytes.as_ref(), body);
        }
    }

    #[test]
    fn object_envelope_accepts_any_object() {
        let response = normalize(
            raw(StatusCode::NOT_FOUND, br#"{"error":"not_found","description":"gone"}"#),
            Envelope::Object,
        )
        .unwrap();
        assert_eq!(response.error(), Some("not_found"));

        assert!(normalize(raw(StatusCode::OK, b"[]"), Envelope::Object).is_err());
    }

    #[test]
    fn empty_success_is_accepted_only_when_allowed() {
        let response = normalize(raw(StatusCode::NO_CONTENT, b""), Envelope::StatusOrEmpty).unwrap();
        assert_eq!(response.body(), &Value::Null);
        assert!(response.is_success());

        assert!(normalize(raw(StatusCode::BAD_GATEWAY, b""), Envelope::StatusOrEmpty).is_err());
        assert!(normalize(raw(StatusCode::NO_CONTENT, b""), Envelope::Status).is_err());
    }

    #[test]
    fn unexpected_error_message() {
        let err = normalize(raw(StatusCode::BAD_GATEWAY, b"oops"), Envelope::Status).unwrap_err();
        assert_eq!(
            err.to_string(),
            "an unexpected error has occurred (http status 502 Bad Gateway)"
        );
    }

    #[test]
    fn call_without_runtime_reports_through_callback() {
        use std::sync::{Arc, Mutex};

        let config = ClientConfig::builder("k").build().unwrap();
        let request = PendingRequest::new(Client::new(), &config, operation());
        let outcome = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&outcome);

        request.call(move |result| {
            *seen.lock().unwrap() = Some(result);
        });

        let outcome = outcome.lock().unwrap().take();
        assert!(matches!(outcome, Some(Err(ClientError::Runtime(_)))));
    }

    #[test]
    fn dispatch_without_runtime_reaches_global_callback() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let failures = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&failures);
        let config = ClientConfig::builder("k")
            .global_callback(move |result: Result<RawResponse, ClientError>| {
                if matches!(result, Err(ClientError::Runtime(_))) {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build()
            .unwrap();

        let dispatched = PendingRequest::new(Client::new(), &config, operation()).dispatch();
        assert!(dispatched.is_delivered());
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn prepare_sets_json_content_type_once() {
        let config = ClientConfig::builder("k").build().unwrap();
        let op = operation().prepare(&config);
        assert_eq!(op.headers().get(CONTENT_TYPE).unwrap(), "application/json");

        let op = operation()
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .prepare(&config);
        assert_eq!(op.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn event_augmentation_follows_config_flags() {
        let config = ClientConfig::builder("k")
            .return_score(true)
            .return_workflow_status(true)
            .abuse_types([AbuseType::PaymentAbuse, AbuseType::Legacy])
            .build()
            .unwrap();

        let op = operation().augment(Augment::Event).prepare(&config);
        assert_eq!(op.query_value("return_score").as_deref(), Some("true"));
        assert_eq!(op.query_value("return_workflow_status").as_deref(), Some("true"));
        assert_eq!(op.query_value("return_action"), None);
        assert_eq!(op.query_value("abuse_types").as_deref(), Some("payment_abuse,legacy"));

        let plain = operation().prepare(&config);
        assert_eq!(plain.url().query(), None);
    }

    #[test]
    fn augmentation_keeps_caller_parameters() {
        let config = ClientConfig::builder("k")
            .abuse_types([AbuseType::Legacy])
            .build()
            .unwrap();

        let op = operation()
            .query("abuse_types", "account_abuse")
            .augment(Augment::Score)
            .prepare(&config);
        assert_eq!(op.url().query(), Some("abuse_types=account_abuse"));
    }
}
