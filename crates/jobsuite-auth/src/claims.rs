//! Unverified JWT payload decoding.
//!
//! The gateway never validates signatures — the upstream backend does that on
//! every call. Claims are decoded only to display expiry information and to
//! avoid sending tokens that are obviously dead.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// Tokens without an `exp` claim are assumed to live this long after issue.
const DEFAULT_TTL_MINUTES: i64 = 60;

/// Relevant claims from an access token payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id or email).
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT without verifying the signature.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token is not three
    /// dot-separated segments, the payload is not valid base64url, or the
    /// decoded payload is not JSON.
    pub fn decode_unverified(token: &str) -> Result<Self, AuthError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) => payload,
            _ => {
                return Err(AuthError::InvalidToken(
                    "expected three dot-separated segments".into(),
                ));
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AuthError::InvalidToken(format!("payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::InvalidToken(format!("payload is not JSON: {e}")))
    }

    /// When the token stops being usable.
    ///
    /// Prefers `exp`; a token carrying only `iat` is assumed to live for
    /// [`DEFAULT_TTL_MINUTES`] after issue. `None` if neither claim exists.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if let Some(exp) = self.exp {
            return DateTime::from_timestamp(exp, 0);
        }
        self.iat.and_then(|iat| {
            DateTime::from_timestamp(iat, 0).map(|t| t + TimeDelta::minutes(DEFAULT_TTL_MINUTES))
        })
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    ///
    /// A token with no expiry information counts as expired — better to force
    /// a fresh login than to send an unknown token upstream.
    #[must_use]
    pub fn is_expired(&self, buffer_secs: i64) -> bool {
        let Some(expires_at) = self.expires_at() else {
            return true;
        };
        expires_at <= Utc::now() + TimeDelta::seconds(buffer_secs)
    }
}
