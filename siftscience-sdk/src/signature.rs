//! Webhook signature computation and verification.
//!
//! The service signs every webhook it sends with the account's webhook
//! signature key. The header wire format is:
//!
//! ```text
//! X-Sift-Science-Signature: sha1={hex_hmac}
//! ```
//!
//! where `hex_hmac = hex(HMAC-SHA1(raw_body, key))`.

/// Header name carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Sift-Science-Signature";

/// Prefix identifying the digest algorithm in the header value.
pub const SIGNATURE_PREFIX: &str = "sha1=";

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid header format")]
    InvalidFormat,
    #[error("invalid hex encoding")]
    InvalidHex,
    #[error("invalid signature")]
    SignatureMismatch,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

fn key(secret: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret)
}

/// Compute the header value the service would send for `body`.
pub fn sign_webhook_body(body: &[u8], secret: &[u8]) -> String {
    let tag = ring::hmac::sign(&key(secret), body);
    format_signature_header(tag.as_ref())
}

/// Parse a `sha1={hex}` header value into the raw digest bytes.
pub fn parse_signature_header(value: &str) -> Result<Box<[u8]>, SignatureError> {
    let hex_digest = value
        .trim()
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or(SignatureError::InvalidFormat)?;
    let digest = hex::decode(hex_digest).map_err(|_| SignatureError::InvalidHex)?;
    Ok(digest.into_boxed_slice())
}

/// Format a `sha1={hex}` header value from a raw digest.
pub fn format_signature_header(digest: &[u8]) -> String {
    format!("{SIGNATURE_PREFIX}{}", hex::encode(digest))
}

/// Verify that `header_value` is a valid signature of `body` under `secret`.
///
/// The comparison is constant-time.
pub fn verify_webhook_signature(
    header_value: &str,
    body: &[u8],
    secret: &[u8],
) -> Result<(), SignatureError> {
    let digest = parse_signature_header(header_value)?;
    ring::hmac::verify(&key(secret), body, &digest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"action":{"id":"test"},"entity":{"id":"u1"}}"#;

    #[test]
    fn signed_body_verifies() {
        let header = sign_webhook_body(BODY, b"webhook-key");
        assert!(header.starts_with("sha1="));
        // 20-byte digest, hex encoded
        assert_eq!(header.len(), SIGNATURE_PREFIX.len() + 40);
        verify_webhook_signature(&header, BODY, b"webhook-key").unwrap();
    }

    #[test]
    fn tampered_body_or_wrong_key_fails() {
        let header = sign_webhook_body(BODY, b"webhook-key");
        assert!(matches!(
            verify_webhook_signature(&header, b"{}", b"webhook-key"),
            Err(SignatureError::SignatureMismatch)
        ));
        assert!(matches!(
            verify_webhook_signature(&header, BODY, b"other-key"),
            Err(SignatureError::SignatureMismatch)
        ));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        assert!(matches!(
            parse_signature_header("md5=abcd"),
            Err(SignatureError::InvalidFormat)
        ));
        assert!(matches!(
            parse_signature_header("sha1=not-hex"),
            Err(SignatureError::InvalidHex)
        ));
    }
}
