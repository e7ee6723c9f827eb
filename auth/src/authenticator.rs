use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenCodec;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default access token lifetime.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Authentication coordinator combining password verification and access
/// token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: AccessTokenCodec,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default password costs and a one hour
    /// access token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: AccessTokenCodec::new(jwt_secret),
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
        }
    }

    /// Replace the password hasher (e.g. with configured cost parameters).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Replace the token codec (e.g. with a configured issuer).
    pub fn with_token_codec(mut self, token_codec: AccessTokenCodec) -> Self {
        self.token_codec = token_codec;
        self
    }

    /// Set the lifetime of issued access tokens.
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Lifetime of issued access tokens.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token is issued to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_credentials(password, stored_hash)?;

        let access_token = self.issue_access_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }
        Ok(())
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where identity was established by a refresh
    /// token instead of a password.
    pub fn issue_access_token(&self, subject: Uuid) -> Result<String, JwtError> {
        self.token_codec.issue(subject, self.access_token_ttl)
    }

    /// Verify an access token and return its subject.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.token_codec.verify(token)
    }
}
