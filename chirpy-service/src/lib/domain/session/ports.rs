use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::RefreshTokenError;
use crate::session::errors::SessionError;
use crate::session::models::RefreshToken;
use crate::session::models::Session;
use crate::session::models::SessionTokens;
use crate::user::models::EmailAddress;
use crate::user::models::Password;
use crate::user::models::UserId;

/// Port for session lifecycle operations.
///
/// Operations that take a header value expect the raw `Authorization` header
/// contents, or an empty string when the header is absent.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify an email and password pair and start a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored hash is malformed
    /// * `RefreshToken` - Refresh token could not be persisted
    async fn login(&self, email: &EmailAddress, password: &Password)
        -> Result<Session, SessionError>;

    /// Issue an access token and a persisted refresh token for `user_id`.
    ///
    /// # Errors
    /// * `AccessToken` - Signing failed
    /// * `RefreshToken` - Refresh token could not be persisted
    async fn issue_session(&self, user_id: &UserId) -> Result<SessionTokens, SessionError>;

    /// Resolve the identity carried by a bearer access token.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `AccessToken` - Token invalid, expired or foreign
    async fn authenticate(&self, authorization: &str) -> Result<UserId, SessionError>;

    /// Exchange a bearer refresh token for a new access token.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `RefreshToken` - Token unknown, revoked or expired
    async fn refresh_session(&self, authorization: &str) -> Result<String, SessionError>;

    /// Revoke the bearer refresh token.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `RefreshToken` - Token unknown or already revoked
    async fn end_session(&self, authorization: &str) -> Result<(), SessionError>;

    /// Check the API key presented by a trusted server-to-server caller.
    async fn verify_server_callback(&self, authorization: &str) -> bool;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;

    /// Mark an unrevoked token as revoked at `at`.
    ///
    /// # Errors
    /// * `NotFound` - No unrevoked token matches
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), RefreshTokenError>;
}
