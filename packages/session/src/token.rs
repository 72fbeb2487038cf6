//! # Access-token claims: client-side decoding
//!
//! The backend issues compact JWTs (`header.payload.signature`) whose payload
//! carries the viewer's `identity` and an `exp` expiry. The client reads
//! those claims to decide who is looking at a page.
//!
//! **Nothing here verifies a signature.** [`decode`] and [`validate`] trust
//! whatever the payload says; they are a display convenience, never an
//! authorization check. The server re-checks every bearer token it receives.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`decode`] | Middle segment → URL-safe base64 → JSON [`Claims`]. Fails with [`MalformedTokenError`]. |
//! | [`viewer_claims`] | [`decode`] for display: failures read as "no viewer". |
//! | [`validate`] | `Some(user_id)` iff the token decodes and `now < exp`. Never fails. |
//! | [`validate_at`] | [`validate`] with an explicit clock, in seconds. |

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Standard alphabet, padding optional (matches the browser's `atob`).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub identity: Option<Identity>,
    /// Expiry as a NumericDate (seconds since the epoch).
    #[serde(default)]
    pub exp: Option<f64>,
}

/// The `identity` claim: who the token was issued to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref()?.user_id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref()?.username.as_deref()
    }

    /// `true` while `now` (seconds) is strictly before `exp`.
    /// A token without `exp` is never live.
    pub fn is_live_at(&self, now: f64) -> bool {
        self.exp.is_some_and(|exp| now < exp)
    }
}

/// Why a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum MalformedTokenError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the payload of a compact token without verifying it.
pub fn decode(token: &str) -> Result<Claims, MalformedTokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or(MalformedTokenError::MissingPayload)?;
    let payload = payload.replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE.decode(payload.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Best-effort decode: a missing, empty or malformed token yields `None`.
///
/// Expiry is not checked; callers that need a live viewer use
/// [`Claims::is_live_at`] or [`validate`].
pub fn viewer_claims(token: Option<&str>) -> Option<Claims> {
    let token = token.filter(|t| !t.is_empty())?;
    decode(token).ok()
}

/// The token's user id if it decodes and has not expired.
///
/// A missing, empty or malformed token yields `None`, as does an expired one.
pub fn validate(token: Option<&str>) -> Option<String> {
    validate_at(token, now_secs())
}

/// [`validate`] against an explicit clock reading, in seconds.
pub fn validate_at(token: Option<&str>, now: f64) -> Option<String> {
    let claims = viewer_claims(token)?;
    if !claims.is_live_at(now) {
        return None;
    }
    claims.user_id().map(str::to_string)
}

/// Current wall-clock time in fractional seconds.
pub fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Accept an id as a JSON string or number; the backend sends integer keys.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned token around a JSON payload, URL-safe and unpadded.
    pub(crate) fn make_token(payload: &str) -> String {
        let body = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("eyJhbGciOiJIUzI1NiJ9.{body}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decode_identity_and_exp() {
        let token = make_token(r#"{"identity":{"userId":"u1","username":"alice"},"exp":1700000000}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.user_id(), Some("u1"));
        assert_eq!(claims.username(), Some("alice"));
        assert_eq!(claims.exp, Some(1_700_000_000.0));
    }

    #[test]
    fn test_decode_numeric_user_id() {
        let token = make_token(r#"{"identity":{"userId":42,"username":"bob"},"exp":1}"#);
        assert_eq!(decode(&token).unwrap().user_id(), Some("42"));
    }

    #[test]
    fn test_decode_url_safe_characters() {
        // This payload encodes with '_' in the URL-safe alphabet.
        let token = make_token(r#"{"identity":{"userId":"x","username":"??>"},"exp":1}"#);
        assert!(token.contains('-') || token.contains('_'));
        assert_eq!(decode(&token).unwrap().username(), Some("??>"));
    }

    #[test]
    fn test_decode_padded_payload() {
        let body = base64::engine::general_purpose::STANDARD.encode(r#"{"exp":50}"#);
        assert!(body.ends_with('='));
        let claims = decode(&format!("h.{body}.s")).unwrap();
        assert_eq!(claims.exp, Some(50.0));
        assert!(claims.identity.is_none());
    }

    #[test]
    fn test_decode_missing_payload() {
        assert!(matches!(decode("no-dots-here"), Err(MalformedTokenError::MissingPayload)));
        assert!(matches!(decode(""), Err(MalformedTokenError::MissingPayload)));
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(decode("h.!!!not base64!!!.s"), Err(MalformedTokenError::Base64(_))));
    }

    #[test]
    fn test_decode_invalid_json() {
        let body = base64::engine::general_purpose::STANDARD.encode("not json");
        assert!(matches!(decode(&format!("h.{body}.s")), Err(MalformedTokenError::Json(_))));
    }

    #[test]
    fn test_validate_live_token() {
        let token = make_token(r#"{"identity":{"userId":"u1","username":"alice"},"exp":1000}"#);
        assert_eq!(validate_at(Some(&token), 999.5).as_deref(), Some("u1"));
    }

    #[test]
    fn test_validate_expiry_is_strict() {
        let token = make_token(r#"{"identity":{"userId":"u1","username":"alice"},"exp":1000}"#);
        assert!(validate_at(Some(&token), 1000.0).is_none());
        assert!(validate_at(Some(&token), 1000.001).is_none());
    }

    #[test]
    fn test_validate_without_exp() {
        let token = make_token(r#"{"identity":{"userId":"u1","username":"alice"}}"#);
        assert!(validate_at(Some(&token), 0.0).is_none());
    }

    #[test]
    fn test_viewer_claims_best_effort() {
        assert!(viewer_claims(None).is_none());
        assert!(viewer_claims(Some("")).is_none());
        assert!(viewer_claims(Some("not-a-jwt")).is_none());
        // Expired claims still identify the viewer; expiry is the caller's call.
        let token = make_token(r#"{"identity":{"userId":"u1","username":"alice"},"exp":1}"#);
        assert_eq!(viewer_claims(Some(&token)).unwrap().username(), Some("alice"));
    }

    #[test]
    fn test_validate_absent_or_malformed() {
        assert!(validate(None).is_none());
        assert!(validate(Some("")).is_none());
        assert!(validate(Some("garbage")).is_none());
        assert!(validate(Some("a.%%%.c")).is_none());
    }

    #[test]
    fn test_validate_uses_wall_clock() {
        let live = make_token(r#"{"identity":{"userId":"u1"},"exp":99999999999}"#);
        let dead = make_token(r#"{"identity":{"userId":"u1"},"exp":1}"#);
        assert_eq!(validate(Some(&live)).as_deref(), Some("u1"));
        assert!(validate(Some(&dead)).is_none());
    }
}
