//! Credential payload decoding.
//!
//! A credential is a JWT-shaped string: three dot-delimited segments where
//! the middle one is a base64url-encoded JSON object. Only that payload is
//! decoded here; the signature segment is never inspected.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("credential has no payload segment")]
    MissingPayload,

    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decoded credential payload. Unknown claims are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Expiry in seconds since epoch. A payload without one never expires.
    pub exp: Option<f64>,
}

impl Claims {
    /// Whether the claims are expired at `now`, expressed in seconds since
    /// epoch (fractional values permitted).
    pub fn is_expired_at(&self, now: f64) -> bool {
        match self.exp {
            Some(exp) => exp < now,
            None => false,
        }
    }
}

/// Decode the middle segment of a dot-delimited credential.
///
/// The credential is trusted as far as its expiry claim and no further; no
/// signature verification takes place.
pub fn decode(raw: &str) -> Result<Claims, DecodeError> {
    let payload = raw.split('.').nth(1).ok_or(DecodeError::MissingPayload)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forge(payload: &str) -> String {
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_valid_payload() {
        let claims = decode(&forge(r#"{"exp": 1700000000, "sub": "user-1"}"#)).unwrap();
        assert_eq!(claims.exp, Some(1700000000.0));
    }

    #[test]
    fn test_decode_missing_exp() {
        let claims = decode(&forge(r#"{"sub": "user-1"}"#)).unwrap();
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_decode_no_payload_segment() {
        assert!(matches!(decode("justonesegment"), Err(DecodeError::MissingPayload)));
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(
            decode("header.!!!not-base64!!!.signature"),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn test_decode_invalid_json() {
        let raw = format!("header.{}.signature", URL_SAFE_NO_PAD.encode("not json"));
        assert!(matches!(decode(&raw), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_non_object_payload() {
        let raw = format!("header.{}.signature", URL_SAFE_NO_PAD.encode("42"));
        assert!(matches!(decode(&raw), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_expiry_comparison() {
        let expired = Claims { exp: Some(1.0) };
        assert!(expired.is_expired_at(100.0));

        let current = Claims { exp: Some(100.5) };
        assert!(!current.is_expired_at(100.0));

        let forever = Claims { exp: None };
        assert!(!forever.is_expired_at(f64::MAX));
    }
}
