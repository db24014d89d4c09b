//! v3 decisions and workflow runs.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ClientError, PendingRequest, SiftClient, object_payload, segment};
use crate::constants::{AbuseType, EntityType};

/// Default offset of [`Decisions::list`].
pub const DEFAULT_FROM: u32 = 0;
/// Default page size of [`Decisions::list`].
pub const DEFAULT_LIMIT: u32 = 100;

/// Decision namespace, obtained from [`SiftClient::decisions`].
#[derive(Debug, Clone, Copy)]
pub struct Decisions<'a> {
    client: &'a SiftClient,
}

impl<'a> Decisions<'a> {
    pub(crate) fn new(client: &'a SiftClient) -> Self {
        Self { client }
    }

    /// List the decisions configured for the account
    /// (`GET accounts/{account_id}/decisions`).
    ///
    /// `from` and `limit` default to `0` and `100`.
    pub fn list(
        &self,
        entity_type: EntityType,
        abuse_types: &[AbuseType],
        from: Option<u32>,
        limit: Option<u32>,
    ) -> Result<PendingRequest, ClientError> {
        let path = format!("accounts/{}/decisions", self.client.account_segment());
        let mut operation = self
            .client
            .v3(Method::GET, &path)?
            .query("entity_type", entity_type.as_str());
        if !abuse_types.is_empty() {
            operation = operation.query("abuse_types", &AbuseType::join(abuse_types));
        }
        let operation = operation
            .query("from", &from.unwrap_or(DEFAULT_FROM).to_string())
            .query("limit", &limit.unwrap_or(DEFAULT_LIMIT).to_string());
        Ok(self.client.prepare(operation))
    }

    /// Apply a decision to a user, or to one of the user's orders when
    /// `order_id` is given.
    pub fn apply<T>(
        &self,
        user_id: &str,
        order_id: Option<&str>,
        payload: &T,
    ) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let mut path = format!(
            "accounts/{}/users/{}",
            self.client.account_segment(),
            segment("user_id", user_id)?
        );
        if let Some(order_id) = order_id {
            path.push_str("/orders/");
            path.push_str(&segment("order_id", order_id)?);
        }
        path.push_str("/decisions");

        let body = object_payload(payload)?;
        let operation = self
            .client
            .v3(Method::POST, &path)?
            .json(Value::Object(body));
        Ok(self.client.prepare(operation))
    }

    /// Current decisions on an entity
    /// (`GET accounts/{account_id}/{users|orders|sessions|content}/{id}/decisions`).
    pub fn status(&self, entity_type: EntityType, entity_id: &str) -> Result<PendingRequest, ClientError> {
        let path = format!(
            "accounts/{}/{}/{}/decisions",
            self.client.account_segment(),
            entity_type.path_segment(),
            segment("entity_id", entity_id)?
        );
        let operation = self.client.v3(Method::GET, &path)?;
        Ok(self.client.prepare(operation))
    }
}

/// Workflow namespace, obtained from [`SiftClient::workflows`].
#[derive(Debug, Clone, Copy)]
pub struct Workflows<'a> {
    client: &'a SiftClient,
}

impl<'a> Workflows<'a> {
    pub(crate) fn new(client: &'a SiftClient) -> Self {
        Self { client }
    }

    /// Status of a workflow run (`GET accounts/{account_id}/workflows/runs/{run_id}`).
    pub fn status(&self, run_id: &str) -> Result<PendingRequest, ClientError> {
        let path = format!(
            "accounts/{}/workflows/runs/{}",
            self.client.account_segment(),
            segment("run_id", run_id)?
        );
        let operation = self.client.v3(Method::GET, &path)?;
        Ok(self.client.prepare(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Envelope;
    use crate::config::ClientConfig;
    use crate::constants::DecisionSource;
    use reqwest::header::AUTHORIZATION;
    use serde_json::json;

    fn client() -> SiftClient {
        SiftClient::new(ClientConfig::builder("k").account_id("acct").build().unwrap())
    }

    #[test]
    fn list_applies_paging_defaults() {
        let client = client();
        let request = client
            .decisions()
            .list(EntityType::User, &[AbuseType::PaymentAbuse], None, None)
            .unwrap();
        let op = request.operation();

        assert_eq!(op.method(), Method::GET);
        assert_eq!(
            op.url().as_str(),
            "https://api3.siftscience.com/v3/accounts/acct/decisions\
             ?entity_type=user&abuse_types=payment_abuse&from=0&limit=100"
        );
        assert!(op.headers().contains_key(AUTHORIZATION));
        assert_eq!(op.envelope_kind(), Envelope::Object);

        let request = client
            .decisions()
            .list(EntityType::Order, &[], Some(200), Some(50))
            .unwrap();
        assert_eq!(
            request.operation().url().query(),
            Some("entity_type=order&from=200&limit=50")
        );
    }

    #[test]
    fn apply_targets_user_or_order() {
        let client = client();
        let payload = json!({
            "decision_id": "block_user",
            "source": DecisionSource::ManualReview,
            "analyst": "analyst@example.com"
        });

        let user = client.decisions().apply("u1", None, &payload).unwrap();
        assert_eq!(user.operation().method(), Method::POST);
        assert_eq!(user.operation().url().path(), "/v3/accounts/acct/users/u1/decisions");
        assert_eq!(user.operation().body(), Some(&payload));

        let order = client.decisions().apply("u1", Some("o 9"), &payload).unwrap();
        assert_eq!(
            order.operation().url().path(),
            "/v3/accounts/acct/users/u1/orders/o%209/decisions"
        );

        assert!(matches!(
            client.decisions().apply("u1", Some(""), &payload),
            Err(ClientError::InvalidArgument { name: "order_id", .. })
        ));
    }

    #[test]
    fn status_uses_plural_entity_segment() {
        let client = client();
        let request = client.decisions().status(EntityType::Session, "s1").unwrap();
        assert_eq!(
            request.operation().url().path(),
            "/v3/accounts/acct/sessions/s1/decisions"
        );
    }

    #[test]
    fn workflow_status_path() {
        let client = client();
        let request = client.workflows().status("run1").unwrap();
        assert_eq!(request.operation().method(), Method::GET);
        assert_eq!(
            request.operation().url().path(),
            "/v3/accounts/acct/workflows/runs/run1"
        );
        assert!(client.workflows().status("").is_err());
    }

    #[test]
    fn missing_account_id_still_builds_request() {
        let client = SiftClient::new(ClientConfig::builder("k").build().unwrap());
        let request = client.workflows().status("run1").unwrap();
        assert_eq!(
            request.operation().url().path(),
            "/v3/accounts//workflows/runs/run1"
        );
    }
}
