//! Token claims inspection.
//!
//! Access and refresh tokens are JWT-shaped: the middle segment is a
//! base64url-encoded JSON payload carrying an `exp` claim. Decoding never
//! panics; any malformed token is treated as expired by the callers here.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use thiserror::Error;

/// Safety buffer applied to expiry checks, in seconds.
///
/// A token within 5 minutes of its expiry is treated as already expired so
/// it gets refreshed before the server rejects it mid-flight.
pub const EXPIRY_BUFFER_SECS: i64 = 300;

/// Claims extracted from a token payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiry as Unix seconds.
    pub exp: i64,
    /// Subject (user identifier), when present.
    #[serde(default)]
    pub sub: Option<String>,
}

/// Reasons a token payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("token does not have a payload segment")]
    MissingPayload,
    #[error("token payload is not valid base64url")]
    InvalidBase64,
    #[error("token payload is not valid claims JSON")]
    InvalidClaims,
}

/// Decode the claims from a JWT-shaped token.
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let payload = token.split('.').nth(1).ok_or(ClaimsError::MissingPayload)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ClaimsError::InvalidBase64)?;
    serde_json::from_slice(&bytes).map_err(|_| ClaimsError::InvalidClaims)
}

/// Check whether a token is expired (or close enough to expiry that it
/// should be refreshed). Undecodable tokens count as expired.
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, chrono::Utc::now().timestamp())
}

/// Expiry check against an injected clock, for deterministic tests.
pub fn is_token_expired_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp < now + EXPIRY_BUFFER_SECS,
        Err(_) => true,
    }
}
