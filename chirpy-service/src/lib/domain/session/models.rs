use chrono::DateTime;
use chrono::Utc;

use crate::user::models::User;
use crate::user::models::UserId;

/// Persisted, revocable refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    /// 64 hex characters encoding 32 random bytes
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token pair handed to a client when a session starts.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authenticated user together with their freshly issued tokens.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub tokens: SessionTokens,
}
