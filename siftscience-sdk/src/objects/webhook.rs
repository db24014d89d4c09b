//! Inbound webhook payload shape.
//!
//! Only the action identifier is interpreted; everything else the service
//! sends (entity, decision, time, ...) stays in [`WebhookPayload::rest`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The action a webhook notification reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAction {
    pub id: String,
}

/// Typed view of a webhook body: `{ "action": { "id": ... }, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub action: Option<WebhookAction>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Extract `action.id` from an untyped webhook body.
pub fn action_id(body: &Value) -> Option<&str> {
    body.get("action")?.get("id")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_action_id() {
        let body = json!({ "action": { "id": "test" }, "entity": { "id": "u1" } });
        assert_eq!(action_id(&body), Some("test"));
        assert_eq!(action_id(&json!({ "action": {} })), None);
        assert_eq!(action_id(&json!({ "action": { "id": 7 } })), None);
        assert_eq!(action_id(&json!([])), None);
    }

    #[test]
    fn typed_payload_keeps_unknown_fields() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "action": { "id": "block_user" },
            "entity": { "type": "user", "id": "u1" },
            "time": 1_461_963_439_151_i64
        }))
        .unwrap();
        assert_eq!(payload.action.unwrap().id, "block_user");
        assert_eq!(payload.rest["entity"]["id"], "u1");
        assert!(payload.rest.contains_key("time"));
    }
}
