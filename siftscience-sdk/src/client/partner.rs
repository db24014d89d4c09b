//! v3 partner account management.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ClientError, PendingRequest, SiftClient, object_payload};

/// Partner namespace, obtained from [`SiftClient::partner`].
///
/// Paths are scoped to the configured partner id.
#[derive(Debug, Clone, Copy)]
pub struct Partner<'a> {
    client: &'a SiftClient,
}

impl<'a> Partner<'a> {
    pub(crate) fn new(client: &'a SiftClient) -> Self {
        Self { client }
    }

    /// Create a merchant account (`POST partners/{partner_id}/accounts`).
    pub fn create_account<T>(&self, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let path = format!("partners/{}/accounts", self.client.partner_segment());
        let body = object_payload(payload)?;
        let operation = self
            .client
            .v3(Method::POST, &path)?
            .json(Value::Object(body));
        Ok(self.client.prepare(operation))
    }

    pub fn list_accounts(&self) -> Result<PendingRequest, ClientError> {
        let path = format!("partners/{}/accounts", self.client.partner_segment());
        let operation = self.client.v3(Method::GET, &path)?;
        Ok(self.client.prepare(operation))
    }

    /// Configure the partner's notification endpoint
    /// (`PUT accounts/{partner_id}/config`).
    pub fn configure_notifications<T>(&self, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let path = format!("accounts/{}/config", self.client.partner_segment());
        let body = object_payload(payload)?;
        let operation = self
            .client
            .v3(Method::PUT, &path)?
            .json(Value::Object(body));
        Ok(self.client.prepare(operation))
    }
}
