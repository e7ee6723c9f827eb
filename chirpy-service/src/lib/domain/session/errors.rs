use thiserror::Error;

use crate::user::errors::UserError;

/// Refresh token lifecycle failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token has expired")]
    Expired,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Refresh token lifetime is out of range: {0}")]
    InvalidLifetime(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Errors raised while establishing, using or ending a session.
///
/// Every credential-related variant is reported to clients as a plain
/// "unauthorized"; the variant itself is only ever logged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Credential error: {0}")]
    Credential(#[from] auth::CredentialError),

    #[error("Access token error: {0}")]
    AccessToken(#[from] auth::JwtError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Password verification task failed: {0}")]
    Task(String),
}

impl From<auth::AuthenticationError> for SessionError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => SessionError::Password(e),
            auth::AuthenticationError::JwtError(e) => SessionError::AccessToken(e),
        }
    }
}

impl SessionError {
    /// Whether the failure is attributable to the caller's credentials rather
    /// than to the server.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SessionError::Credential(_) | SessionError::InvalidCredentials => true,
            SessionError::AccessToken(e) => !matches!(e, auth::JwtError::SigningFailed(_)),
            SessionError::RefreshToken(e) => matches!(
                e,
                RefreshTokenError::NotFound
                    | RefreshTokenError::Expired
                    | RefreshTokenError::Revoked
            ),
            SessionError::Password(_) | SessionError::User(_) | SessionError::Task(_) => false,
        }
    }
}
