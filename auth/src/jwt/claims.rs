use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Registered JWT claims carried by an access token.
///
/// Only the RFC 7519 claims the service relies on are present; all four are
/// required when a token is verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `issuer` - Name of the issuing service
    /// * `subject` - Unique user identifier
    /// * `ttl` - Token lifetime; a negative value yields an already expired token
    ///
    /// # Errors
    /// * `SigningFailed` - `now + ttl` is not a representable timestamp
    pub fn issued_now(
        issuer: impl ToString,
        subject: impl ToString,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::SigningFailed(format!("token lifetime {} is out of range", ttl))
        })?;

        Ok(Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if token is expired.
    ///
    /// A token is usable only while `current_timestamp < exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
