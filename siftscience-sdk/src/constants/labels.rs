//! Abuse types and label values.

use serde::{Deserialize, Serialize};

/// Categories of abuse the scoring models distinguish between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbuseType {
    PaymentAbuse,
    ContentAbuse,
    PromotionAbuse,
    AccountAbuse,
    AccountTakeover,
    /// The single pre-v204 score.
    Legacy,
}

impl AbuseType {
    pub const ALL: [AbuseType; 6] = [
        AbuseType::PaymentAbuse,
        AbuseType::ContentAbuse,
        AbuseType::PromotionAbuse,
        AbuseType::AccountAbuse,
        AbuseType::AccountTakeover,
        AbuseType::Legacy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AbuseType::PaymentAbuse => "payment_abuse",
            AbuseType::ContentAbuse => "content_abuse",
            AbuseType::PromotionAbuse => "promotion_abuse",
            AbuseType::AccountAbuse => "account_abuse",
            AbuseType::AccountTakeover => "account_takeover",
            AbuseType::Legacy => "legacy",
        }
    }

    /// Join a list of abuse types into the comma-separated form used in
    /// query strings.
    pub fn join(types: &[AbuseType]) -> String {
        types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for AbuseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label applied to a fingerprinted device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceLabel {
    Bad,
    NotBad,
}

impl DeviceLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceLabel::Bad => "bad",
            DeviceLabel::NotBad => "not_bad",
        }
    }
}

impl std::fmt::Display for DeviceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason codes accepted in the `$reasons` field of a user label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    #[serde(rename = "$chargeback")]
    Chargeback,
    #[serde(rename = "$spam")]
    Spam,
    #[serde(rename = "$funny_money")]
    FunnyMoney,
    #[serde(rename = "$fake")]
    Fake,
    #[serde(rename = "$referral")]
    Referral,
    #[serde(rename = "$duplicate_account")]
    DuplicateAccount,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Chargeback => "$chargeback",
            Reason::Spam => "$spam",
            Reason::FunnyMoney => "$funny_money",
            Reason::Fake => "$fake",
            Reason::Referral => "$referral",
            Reason::DuplicateAccount => "$duplicate_account",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abuse_types_join_with_commas() {
        assert_eq!(
            AbuseType::join(&[AbuseType::PaymentAbuse, AbuseType::Legacy]),
            "payment_abuse,legacy"
        );
        assert_eq!(AbuseType::join(&[]), "");
    }

    #[test]
    fn serde_names_match_wire_names() {
        for t in AbuseType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, t.as_str());
        }
        assert_eq!(
            serde_json::to_value(DeviceLabel::NotBad).unwrap(),
            "not_bad"
        );
        assert_eq!(
            serde_json::to_value(Reason::DuplicateAccount).unwrap(),
            "$duplicate_account"
        );
    }
}
