//! Client configuration.
//!
//! [`ClientConfig`] is validated once by [`ClientConfigBuilder::build`] and is
//! read-only afterwards. Data fields can also come from a TOML file (see
//! [`file`]); callbacks and webhook handlers are attached in code.

pub mod file;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::client::{ClientError, ResponseCallback, is_dot_segment};
use crate::constants::AbuseType;
use crate::objects::{EventType, RawResponse};
use crate::webhook::{WebhookHandler, WebhookRegistry};

/// Default v20x API version.
pub const DEFAULT_VERSION: &str = "v205";

/// Host of the v20x API (events, labels, scores).
pub const DEFAULT_API_HOST: &str = "https://api.siftscience.com";

/// Base of the v3 API (decisions, workflows, fingerprint, partner).
pub const DEFAULT_API3_URL: &str = "https://api3.siftscience.com/v3/";

/// Environment variable consulted when a config file has no `api_key`.
pub const API_KEY_ENV: &str = "SIFT_API_KEY";

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("api_key is required")]
    MissingApiKey,

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Validated, immutable client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    version: String,
    account_id: Option<String>,
    partner_id: Option<String>,
    custom_events: Vec<String>,
    global_callback: Option<ResponseCallback>,
    return_action: bool,
    return_score: bool,
    return_workflow_status: bool,
    abuse_types: Vec<AbuseType>,
    webhooks: WebhookRegistry,
    webhook_signature_key: Option<String>,
    api_url: Url,
    api3_url: Url,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("version", &self.version)
            .field("account_id", &self.account_id)
            .field("partner_id", &self.partner_id)
            .field("custom_events", &self.custom_events)
            .field("global_callback", &self.global_callback.is_some())
            .field("return_action", &self.return_action)
            .field("return_score", &self.return_score)
            .field("return_workflow_status", &self.return_workflow_status)
            .field("abuse_types", &self.abuse_types)
            .field("webhooks", &self.webhooks)
            .field(
                "webhook_signature_key",
                &self.webhook_signature_key.as_ref().map(|_| "<redacted>"),
            )
            .field("api_url", &self.api_url.as_str())
            .field("api3_url", &self.api3_url.as_str())
            .finish()
    }
}

impl ClientConfig {
    /// Start building a configuration around the (required) API key.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    /// Load data fields from a TOML file.
    ///
    /// Falls back to the `SIFT_API_KEY` environment variable when the file
    /// has no `api_key`. The returned builder still accepts callbacks and
    /// webhook handlers.
    pub fn from_file(path: impl AsRef<Path>) -> Result<ClientConfigBuilder, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`from_file`](Self::from_file) for an in-memory TOML document.
    pub fn from_toml_str(content: &str) -> Result<ClientConfigBuilder, ConfigError> {
        let file_config: file::FileConfig = toml::from_str(content)?;
        file_config.into_builder(std::env::var(API_KEY_ENV).ok())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn partner_id(&self) -> Option<&str> {
        self.partner_id.as_deref()
    }

    /// Custom event names that survived registration, in registration order.
    pub fn custom_events(&self) -> &[String] {
        &self.custom_events
    }

    pub fn global_callback(&self) -> Option<&ResponseCallback> {
        self.global_callback.as_ref()
    }

    pub fn return_action(&self) -> bool {
        self.return_action
    }

    pub fn return_score(&self) -> bool {
        self.return_score
    }

    pub fn return_workflow_status(&self) -> bool {
        self.return_workflow_status
    }

    pub fn abuse_types(&self) -> &[AbuseType] {
        &self.abuse_types
    }

    pub fn webhooks(&self) -> &WebhookRegistry {
        &self.webhooks
    }

    pub fn webhook_signature_key(&self) -> Option<&str> {
        self.webhook_signature_key.as_deref()
    }

    /// Base URL of the v20x API, always ending in `/`.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Base URL of the v3 API, always ending in `/`.
    pub fn api3_url(&self) -> &Url {
        &self.api3_url
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    api_key: String,
    version: String,
    account_id: Option<String>,
    partner_id: Option<String>,
    custom_events: Vec<String>,
    global_callback: Option<ResponseCallback>,
    return_action: bool,
    return_score: bool,
    return_workflow_status: bool,
    abuse_types: Vec<AbuseType>,
    webhooks: WebhookRegistry,
    webhook_signature_key: Option<String>,
    api_url: Option<Url>,
    api3_url: Option<Url>,
}

impl ClientConfigBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            version: DEFAULT_VERSION.to_owned(),
            account_id: None,
            partner_id: None,
            custom_events: Vec::new(),
            global_callback: None,
            return_action: false,
            return_score: false,
            return_workflow_status: false,
            abuse_types: Vec::new(),
            webhooks: WebhookRegistry::new(),
            webhook_signature_key: None,
            api_url: None,
            api3_url: None,
        }
    }

    /// v20x API version, e.g. `v205`.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    #[must_use]
    pub fn partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    /// Register additional event names. See [`build`](Self::build) for how
    /// collisions are resolved.
    #[must_use]
    pub fn custom_events<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_events.extend(names.into_iter().map(Into::into));
        self
    }

    /// Callback that receives every response the caller does not handle
    /// with a per-call callback or by awaiting.
    #[must_use]
    pub fn global_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(Result<RawResponse, ClientError>) + Send + Sync + 'static,
    {
        self.global_callback = Some(Arc::new(callback));
        self
    }

    /// Legacy (v203) flag asking event submissions to return the action
    /// taken.
    #[must_use]
    pub fn return_action(mut self, enabled: bool) -> Self {
        self.return_action = enabled;
        self
    }

    #[must_use]
    pub fn return_score(mut self, enabled: bool) -> Self {
        self.return_score = enabled;
        self
    }

    #[must_use]
    pub fn return_workflow_status(mut self, enabled: bool) -> Self {
        self.return_workflow_status = enabled;
        self
    }

    /// Restrict returned scores to these abuse types.
    #[must_use]
    pub fn abuse_types(mut self, types: impl IntoIterator<Item = AbuseType>) -> Self {
        self.abuse_types.extend(types);
        self
    }

    /// Register a webhook handler for `action` (`"all"` for every action).
    #[must_use]
    pub fn webhook(mut self, action: impl Into<String>, handler: impl WebhookHandler + 'static) -> Self {
        self.webhooks = self.webhooks.with_handler(action, handler);
        self
    }

    /// Replace the webhook registry wholesale.
    #[must_use]
    pub fn webhooks(mut self, registry: WebhookRegistry) -> Self {
        self.webhooks = registry;
        self
    }

    /// Key used to verify `X-Sift-Science-Signature` on inbound webhooks.
    #[must_use]
    pub fn webhook_signature_key(mut self, key: impl Into<String>) -> Self {
        self.webhook_signature_key = Some(key.into());
        self
    }

    /// Override the v20x base URL (the version is not appended).
    #[must_use]
    pub fn api_url(mut self, url: Url) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Override the v3 base URL.
    #[must_use]
    pub fn api3_url(mut self, url: Url) -> Self {
        self.api3_url = Some(url);
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// Custom event names are registered here: blank names, names of
    /// built-in events and repeats of an earlier custom name are skipped.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.trim().to_owned();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let version = self.version.trim().to_owned();
        if version.is_empty() {
            return Err(ConfigError::ValidationError(
                "version must not be blank".to_owned(),
            ));
        }

        for (field, id) in [("account_id", &self.account_id), ("partner_id", &self.partner_id)] {
            if id.as_deref().is_some_and(is_dot_segment) {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must not be a dot segment"
                )));
            }
        }

        let api_url = match self.api_url {
            Some(url) => url,
            None => Url::parse(&format!("{DEFAULT_API_HOST}/{version}/"))?,
        };
        let api3_url = match self.api3_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_API3_URL)?,
        };

        Ok(ClientConfig {
            api_key,
            version,
            account_id: self.account_id,
            partner_id: self.partner_id,
            custom_events: register_custom_events(self.custom_events),
            global_callback: self.global_callback,
            return_action: self.return_action,
            return_score: self.return_score,
            return_workflow_status: self.return_workflow_status,
            abuse_types: self.abuse_types,
            webhooks: self.webhooks,
            webhook_signature_key: self.webhook_signature_key,
            api_url: with_trailing_slash(api_url),
            api3_url: with_trailing_slash(api3_url),
        })
    }
}

fn register_custom_events(names: Vec<String>) -> Vec<String> {
    let mut registered: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if name.trim().is_empty() || EventType::from_name(&name).is_some() || registered.contains(&name) {
            tracing::debug!(event = %name, "Skipping custom event registration");
            continue;
        }
        registered.push(name);
    }
    registered
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
