//! Event field values, entity kinds and the response status catalog.

use serde::{Deserialize, Serialize};

/// Outcome value used by `$login_status`, `$transaction_status` and similar
/// event fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "$success")]
    Success,
    #[serde(rename = "$failure")]
    Failure,
    #[serde(rename = "$pending")]
    Pending,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "$success",
            Status::Failure => "$failure",
            Status::Pending => "$pending",
        }
    }
}

/// Values of the `$transaction_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "$sale")]
    Sale,
    #[serde(rename = "$authorize")]
    Authorize,
    #[serde(rename = "$capture")]
    Capture,
    #[serde(rename = "$void")]
    Void,
    #[serde(rename = "$refund")]
    Refund,
    #[serde(rename = "$deposit")]
    Deposit,
    #[serde(rename = "$withdrawal")]
    Withdrawal,
    #[serde(rename = "$transfer")]
    Transfer,
}

/// Who or what produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionSource {
    ManualReview,
    AutomatedRule,
    Chargeback,
}

/// Kinds of entity that decisions can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Order,
    Session,
    Content,
}

impl EntityType {
    /// Singular form, used by the `entity_type` query filter.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Order => "order",
            EntityType::Session => "session",
            EntityType::Content => "content",
        }
    }

    /// Plural form, used as a path segment (`accounts/{id}/users/...`).
    pub fn path_segment(self) -> &'static str {
        match self {
            EntityType::User => "users",
            EntityType::Order => "orders",
            EntityType::Session => "sessions",
            EntityType::Content => "content",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric `status` codes returned in v20x response envelopes, with the
/// service's description of each.
pub const RESPONSE_STATUS_MESSAGES: &[(i64, &str)] = &[
    (-4, "Service currently unavailable. Please try again later."),
    (-3, "Server-side timeout processing request. Please try again later."),
    (-2, "Unexpected server-side error"),
    (-1, "Unexpected server-side error"),
    (0, "Success"),
    (51, "Invalid API key"),
    (52, "Invalid characters in field name"),
    (53, "Invalid characters in field value"),
    (54, "Specified user_id has no scoreable events"),
    (55, "Missing required field"),
    (56, "Invalid JSON in request"),
    (57, "Invalid HTTP body"),
    (60, "Rate limited; too many events have been received in a short period of time"),
    (104, "Invalid API version"),
    (105, "Not a valid reserved field"),
];

/// Look up the description of a response status code.
pub fn status_message(code: i64) -> Option<&'static str> {
    RESPONSE_STATUS_MESSAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, message)| *message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_messages() {
        assert_eq!(status_message(0), Some("Success"));
        assert_eq!(status_message(51), Some("Invalid API key"));
        assert!(status_message(60).unwrap().starts_with("Rate limited"));
        assert_eq!(status_message(7), None);
    }

    #[test]
    fn entity_type_forms() {
        assert_eq!(EntityType::User.as_str(), "user");
        assert_eq!(EntityType::User.path_segment(), "users");
        assert_eq!(EntityType::Content.path_segment(), "content");
    }

    #[test]
    fn decision_source_wire_names() {
        assert_eq!(
            serde_json::to_value(DecisionSource::ManualReview).unwrap(),
            "MANUAL_REVIEW"
        );
        assert_eq!(serde_json::to_value(Status::Failure).unwrap(), "$failure");
        assert_eq!(
            serde_json::to_value(TransactionType::Authorize).unwrap(),
            "$authorize"
        );
    }
}
