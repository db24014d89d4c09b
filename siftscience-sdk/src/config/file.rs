//! TOML file configuration structures.
//!
//! ```toml
//! api_key = "..."
//! version = "v205"
//! account_id = "5265ac266a58f0fcd3000000"
//! custom_events = ["submit_comment", "delete_account"]
//! return_score = true
//! abuse_types = ["payment_abuse", "legacy"]
//! webhook_signature_key = "..."
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ClientConfigBuilder, ConfigError, DEFAULT_VERSION};
use crate::constants::AbuseType;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// May be omitted in favour of the `SIFT_API_KEY` environment variable.
    pub api_key: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    pub account_id: Option<String>,
    pub partner_id: Option<String>,
    #[serde(default)]
    pub custom_events: Vec<String>,
    #[serde(default)]
    pub return_action: bool,
    #[serde(default)]
    pub return_score: bool,
    #[serde(default)]
    pub return_workflow_status: bool,
    #[serde(default)]
    pub abuse_types: Vec<AbuseType>,
    pub webhook_signature_key: Option<String>,
    pub api_url: Option<Url>,
    pub api3_url: Option<Url>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_owned()
}

impl FileConfig {
    /// Turn the file contents into a builder. `env_api_key` is used only
    /// when the file has no `api_key`.
    pub fn into_builder(self, env_api_key: Option<String>) -> Result<ClientConfigBuilder, ConfigError> {
        let api_key = self
            .api_key
            .or(env_api_key)
            .ok_or(ConfigError::MissingApiKey)?;

        let mut builder = ClientConfigBuilder::new(api_key)
            .version(self.version)
            .custom_events(self.custom_events)
            .return_action(self.return_action)
            .return_score(self.return_score)
            .return_workflow_status(self.return_workflow_status)
            .abuse_types(self.abuse_types);

        if let Some(account_id) = self.account_id {
            builder = builder.account_id(account_id);
        }
        if let Some(partner_id) = self.partner_id {
            builder = builder.partner_id(partner_id);
        }
        if let Some(key) = self.webhook_signature_key {
            builder = builder.webhook_signature_key(key);
        }
        if let Some(url) = self.api_url {
            builder = builder.api_url(url);
        }
        if let Some(url) = self.api3_url {
            builder = builder.api3_url(url);
        }

        Ok(builder)
    }
}
