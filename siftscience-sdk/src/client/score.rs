//! `score/{id}`.

use reqwest::Method;

use super::{Augment, ClientError, PendingRequest, SiftClient, segment};
use crate::constants::AbuseType;

impl SiftClient {
    /// Fetch a user's scores (`GET score/{user_id}`).
    ///
    /// When `abuse_types` is empty the configured abuse types, if any, are
    /// requested instead.
    pub fn score(&self, user_id: &str, abuse_types: &[AbuseType]) -> Result<PendingRequest, ClientError> {
        let path = format!("score/{}", segment("user_id", user_id)?);
        let mut operation = self
            .v2(Method::GET, &path)?
            .query("api_key", self.config().api_key())
            .augment(Augment::Score);
        if !abuse_types.is_empty() {
            operation = operation.query("abuse_types", &AbuseType::join(abuse_types));
        }
        Ok(self.prepare(operation))
    }
}
