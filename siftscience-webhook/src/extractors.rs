//! Extractor for inbound webhook bodies.
//!
//! [`VerifiedPayload`] reads the raw body, checks the
//! `X-Sift-Science-Signature` header when a signature key is configured, and
//! only then parses the JSON. Signature checks must run on the exact bytes
//! the service signed, so this cannot be layered on top of `Json<T>`.

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use siftscience_sdk::signature::{self, SIGNATURE_HEADER, SignatureError};
use siftscience_sdk::webhook::WebhookRequest;

use crate::state::WebhookState;

/// Largest webhook body accepted.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A webhook whose signature (if required) checked out and whose body is
/// valid JSON.
pub struct VerifiedPayload(pub WebhookRequest);

/// Reasons an inbound webhook is refused before any handler runs.
#[derive(Debug, thiserror::Error)]
pub enum PayloadRejection {
    #[error("missing X-Sift-Science-Signature header")]
    MissingSignature,
    #[error("invalid X-Sift-Science-Signature header")]
    InvalidSignatureHeader,
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("failed to read request body")]
    BodyReadError,
    #[error("invalid JSON body: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<SignatureError> for PayloadRejection {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::InvalidFormat | SignatureError::InvalidHex => {
                Self::InvalidSignatureHeader
            }
            SignatureError::SignatureMismatch => Self::VerificationFailed,
        }
    }
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        let status = match self {
            PayloadRejection::MissingSignature | PayloadRejection::VerificationFailed => {
                StatusCode::UNAUTHORIZED
            }
            PayloadRejection::InvalidSignatureHeader
            | PayloadRejection::BodyReadError
            | PayloadRejection::JsonError(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(error = %self, status = status.as_u16(), "Rejected webhook");
        (status, self.to_string()).into_response()
    }
}

impl FromRequest<WebhookState> for VerifiedPayload {
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &WebhookState) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        let signature_header = match parts.headers.get(SIGNATURE_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| PayloadRejection::InvalidSignatureHeader)?,
            ),
            None => None,
        };

        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|_| PayloadRejection::BodyReadError)?;

        if let Some(key) = state.signature_key() {
            let header = signature_header.ok_or(PayloadRejection::MissingSignature)?;
            signature::verify_webhook_signature(header, &bytes, key)?;
        }

        let body = serde_json::from_slice(&bytes)?;
        let request = parts
            .headers
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
            .fold(WebhookRequest::new(body), |request, (name, value)| {
                request.with_header(name, value)
            });

        Ok(VerifiedPayload(request))
    }
}
