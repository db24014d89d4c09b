//! State shared by every webhook request.

use std::sync::Arc;

use siftscience_sdk::ClientConfig;
use siftscience_sdk::webhook::WebhookRegistry;

/// Handlers plus the optional signature key. Cheap to clone.
#[derive(Clone, Debug)]
pub struct WebhookState {
    pub registry: WebhookRegistry,
    signature_key: Option<Arc<[u8]>>,
}

impl WebhookState {
    pub fn new(registry: WebhookRegistry) -> Self {
        Self {
            registry,
            signature_key: None,
        }
    }

    /// Require `X-Sift-Science-Signature` and verify it with `key`.
    pub fn with_signature_key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.signature_key = Some(Arc::from(key.as_ref()));
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let state = Self::new(config.webhooks().clone());
        match config.webhook_signature_key() {
            Some(key) => state.with_signature_key(key),
            None => state,
        }
    }

    pub fn signature_key(&self) -> Option<&[u8]> {
        self.signature_key.as_deref()
    }
}
