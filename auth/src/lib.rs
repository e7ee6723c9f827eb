//! Authentication utilities library
//!
//! Provides the authentication building blocks used by the Chirpy service:
//! - Password hashing (Argon2id)
//! - Access token issuance and verification (HS256 JWT)
//! - Credential extraction from authorization headers
//! - Opaque refresh token generation
//! - Shared-secret API key checks
//!
//! The library holds no state beyond its keys. Persistence of refresh tokens
//! and user records belongs to the service that uses it.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::extract_bearer_token;
//! use auth::Authenticator;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//!
//! // Protected request: extract and validate token
//! let header = format!("Bearer {}", result.access_token);
//! let token = extract_bearer_token(&header).unwrap();
//! assert_eq!(auth.validate_access_token(token).unwrap(), user_id);
//! ```

pub mod api_key;
pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use api_key::ApiKeyGuard;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credentials::extract_api_key;
pub use credentials::extract_bearer_token;
pub use credentials::CredentialError;
pub use credentials::CredentialScheme;
pub use jwt::AccessTokenCodec;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
