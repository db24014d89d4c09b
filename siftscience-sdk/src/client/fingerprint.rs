//! v3 device fingerprinting.

use reqwest::Method;
use serde_json::json;

use super::{ClientError, PendingRequest, SiftClient, segment};
use crate::constants::DeviceLabel;

/// Device fingerprinting namespace, obtained from [`SiftClient::fingerprint`].
///
/// All paths are scoped to the configured account id.
#[derive(Debug, Clone, Copy)]
pub struct Fingerprint<'a> {
    client: &'a SiftClient,
}

impl<'a> Fingerprint<'a> {
    pub(crate) fn new(client: &'a SiftClient) -> Self {
        Self { client }
    }

    /// Devices seen for a user.
    pub fn get_devices(&self, user_id: &str) -> Result<PendingRequest, ClientError> {
        self.get(&format!("users/{}/devices", segment("user_id", user_id)?))
    }

    pub fn get_session(&self, session_id: &str) -> Result<PendingRequest, ClientError> {
        self.get(&format!("sessions/{}", segment("session_id", session_id)?))
    }

    pub fn get_device(&self, device_id: &str) -> Result<PendingRequest, ClientError> {
        self.get(&format!("devices/{}", segment("device_id", device_id)?))
    }

    /// Label a device `bad` or `not_bad` (`PUT devices/{device_id}/label`).
    pub fn label_device(&self, device_id: &str, label: DeviceLabel) -> Result<PendingRequest, ClientError> {
        let path = format!(
            "accounts/{}/devices/{}/label",
            self.client.account_segment(),
            segment("device_id", device_id)?
        );
        let operation = self
            .client
            .v3(Method::PUT, &path)?
            .json(json!({ "label": label.as_str() }));
        Ok(self.client.prepare(operation))
    }

    fn get(&self, resource: &str) -> Result<PendingRequest, ClientError> {
        let path = format!("accounts/{}/{resource}", self.client.account_segment());
        let operation = self.client.v3(Method::GET, &path)?;
        Ok(self.client.prepare(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn client() -> SiftClient {
        SiftClient::new(ClientConfig::builder("k").account_id("acct").build().unwrap())
    }

    #[test]
    fn lookups_are_account_scoped_gets() {
        let client = client();
        let fingerprint = client.fingerprint();

        let cases = [
            (fingerprint.get_devices("u1").unwrap(), "/v3/accounts/acct/users/u1/devices"),
            (fingerprint.get_session("s1").unwrap(), "/v3/accounts/acct/sessions/s1"),
            (fingerprint.get_device("d1").unwrap(), "/v3/accounts/acct/devices/d1"),
        ];
        for (request, path) in cases {
            assert_eq!(request.operation().method(), Method::GET);
            assert_eq!(request.operation().url().path(), path);
            assert!(request.operation().body().is_none());
        }
    }

    #[test]
    fn label_device_puts_label() {
        let client = client();
        let request = client
            .fingerprint()
            .label_device("d1", DeviceLabel::NotBad)
            .unwrap();
        let op = request.operation();
        assert_eq!(op.method(), Method::PUT);
        assert_eq!(op.url().path(), "/v3/accounts/acct/devices/d1/label");
        assert_eq!(op.body(), Some(&json!({ "label": "not_bad" })));
    }

    #[test]
    fn blank_ids_are_rejected() {
        let client = client();
        let fingerprint = client.fingerprint();
        assert!(fingerprint.get_devices("").is_err());
        assert!(fingerprint.get_session(" ").is_err());
        assert!(matches!(
            fingerprint.label_device("", DeviceLabel::Bad),
            Err(ClientError::InvalidArgument { name: "device_id", .. })
        ));
    }
}
