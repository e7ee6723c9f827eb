use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// Default issuer embedded in every access token.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Signing algorithms this codec accepts.
///
/// Exactly one member: a token whose header names anything else is rejected
/// before its signature is looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningAlgorithm {
    Hs256,
}

impl SigningAlgorithm {
    const ALLOWED: [SigningAlgorithm; 1] = [SigningAlgorithm::Hs256];

    /// Map a token header algorithm onto the allow-list.
    pub fn from_header(algorithm: Algorithm) -> Option<Self> {
        Self::ALLOWED
            .into_iter()
            .find(|allowed| allowed.as_jsonwebtoken() == algorithm)
    }

    fn as_jsonwebtoken(self) -> Algorithm {
        match self {
            SigningAlgorithm::Hs256 => Algorithm::HS256,
        }
    }
}

/// Issues and verifies short-lived access tokens.
///
/// Tokens are HS256-signed JWTs binding a user identity (`sub`) to an issuer
/// and an expiry. Verification is stateless: signature, algorithm, issuer and
/// expiry are the only checks.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: SigningAlgorithm,
    issuer: String,
}

impl AccessTokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_issuer(secret, DEFAULT_ISSUER)
    }

    /// Create a codec that issues and accepts tokens for a custom issuer.
    pub fn with_issuer(secret: &[u8], issuer: impl ToString) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: SigningAlgorithm::Hs256,
            issuer: issuer.to_string(),
        }
    }

    /// Issuer name embedded in tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue an access token for `subject`, valid for `ttl`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed or `ttl` is out of range
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::issued_now(&self.issuer, subject, ttl)?;
        let header = Header::new(self.algorithm.as_jsonwebtoken());

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify an access token and return its subject.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is not in the future
    /// * `InvalidToken` - Malformed token, disallowed algorithm, bad signature,
    ///   wrong issuer, or a subject that is not a UUID
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Uuid::parse_str(&claims.sub)
            .map_err(|e| JwtError::InvalidToken(format!("subject is not a UUID: {}", e)))
    }

    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let algorithm = SigningAlgorithm::from_header(header.alg).ok_or_else(|| {
            JwtError::InvalidToken(format!("signing algorithm {:?} is not allowed", header.alg))
        })?;
        if algorithm != self.algorithm {
            return Err(JwtError::InvalidToken(format!(
                "signing algorithm {:?} is not allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(self.algorithm.as_jsonwebtoken());
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}
