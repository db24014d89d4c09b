//! `users/{id}/labels`.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ClientError, Envelope, PendingRequest, SiftClient, object_payload, segment};
use crate::constants::AbuseType;

impl SiftClient {
    /// Label a user (`POST users/{user_id}/labels`).
    ///
    /// `$api_key` is stamped into a copy of the payload.
    pub fn label<T>(&self, user_id: &str, payload: &T) -> Result<PendingRequest, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let path = format!("users/{}/labels", segment("user_id", user_id)?);
        let mut data = object_payload(payload)?;
        data.insert(
            "$api_key".to_owned(),
            Value::String(self.config().api_key().to_owned()),
        );

        let operation = self.v2(Method::POST, &path)?.json(Value::Object(data));
        Ok(self.prepare(operation))
    }

    /// Remove a user's label (`DELETE users/{user_id}/labels`), optionally
    /// for a single abuse type.
    ///
    /// The service answers a successful removal with an empty `204`, which
    /// resolves to a response with a `null` body.
    pub fn unlabel(
        &self,
        user_id: &str,
        abuse_type: Option<AbuseType>,
    ) -> Result<PendingRequest, ClientError> {
        let path = format!("users/{}/labels", segment("user_id", user_id)?);
        let mut operation = self
            .v2(Method::DELETE, &path)?
            .query("api_key", self.config().api_key())
            .envelope(Envelope::StatusOrEmpty);
        if let Some(abuse_type) = abuse_type {
            operation = operation.query("abuse_type", abuse_type.as_str());
        }
        Ok(self.prepare(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::constants::Reason;
    use serde_json::json;

    fn client() -> SiftClient {
        SiftClient::new(
            ClientConfig::builder("k")
                .abuse_types([AbuseType::Legacy])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn label_posts_payload_with_key() {
        let client = client();
        let payload = json!({
            "$is_bad": true,
            "$abuse_type": "payment_abuse",
            "$reasons": [Reason::Chargeback.as_str()]
        });

        let request = client.label("user 1", &payload).unwrap();
        let op = request.operation();
        assert_eq!(op.method(), Method::POST);
        assert_eq!(op.url().as_str(), "https://api.siftscience.com/v205/users/user%201/labels");
        assert_eq!(op.body().unwrap()["$api_key"], "k");
        assert_eq!(op.body().unwrap()["$reasons"], json!(["$chargeback"]));
        assert!(payload.get("$api_key").is_none());
    }

    #[test]
    fn unlabel_uses_query_parameters_only() {
        let client = client();

        let request = client.unlabel("u1", Some(AbuseType::AccountAbuse)).unwrap();
        let op = request.operation();
        assert_eq!(op.method(), Method::DELETE);
        assert_eq!(op.url().path(), "/v205/users/u1/labels");
        assert_eq!(op.url().query(), Some("api_key=k&abuse_type=account_abuse"));
        assert!(op.body().is_none());
        assert_eq!(op.envelope_kind(), Envelope::StatusOrEmpty);

        let request = client.unlabel("u1", None).unwrap();
        assert_eq!(request.operation().url().query(), Some("api_key=k"));
    }

    #[test]
    fn blank_user_id_is_rejected() {
        let client = client();
        assert!(matches!(
            client.label("", &json!({})),
            Err(ClientError::InvalidArgument { name: "user_id", .. })
        ));
        assert!(client.unlabel(" ", None).is_err());
    }
}
