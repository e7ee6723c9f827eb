use super::errors::CredentialError;

/// Authorization schemes understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    /// `Bearer <token>`, carrying access or refresh tokens
    Bearer,
    /// `ApiKey <key>`, carrying the shared webhook secret
    ApiKey,
}

impl CredentialScheme {
    /// Scheme name as it appears in the header.
    pub fn name(self) -> &'static str {
        match self {
            CredentialScheme::Bearer => "Bearer",
            CredentialScheme::ApiKey => "ApiKey",
        }
    }

    /// Literal header prefix: the scheme name followed by a single space.
    pub fn prefix(self) -> &'static str {
        match self {
            CredentialScheme::Bearer => "Bearer ",
            CredentialScheme::ApiKey => "ApiKey ",
        }
    }
}

/// Pull the credential out of an authorization header value.
///
/// The prefix match is case-sensitive. The remainder is trimmed of
/// surrounding whitespace and must not be empty.
///
/// # Arguments
/// * `header_value` - Raw header value (empty when the header is absent)
/// * `scheme` - Expected authorization scheme
///
/// # Errors
/// * `Missing` - Header value is empty
/// * `Malformed` - Prefix does not match, or nothing follows it
pub fn extract_credential(
    header_value: &str,
    scheme: CredentialScheme,
) -> Result<&str, CredentialError> {
    if header_value.is_empty() {
        return Err(CredentialError::Missing);
    }

    let malformed = CredentialError::Malformed {
        expected: scheme.name(),
    };

    let credential = header_value
        .strip_prefix(scheme.prefix())
        .ok_or(malformed)?
        .trim();

    if credential.is_empty() {
        return Err(malformed);
    }

    Ok(credential)
}

/// Extract a token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header_value: &str) -> Result<&str, CredentialError> {
    extract_credential(header_value, CredentialScheme::Bearer)
}

/// Extract a key from an `Authorization: ApiKey <key>` header value.
pub fn extract_api_key(header_value: &str) -> Result<&str, CredentialError> {
    extract_credential(header_value, CredentialScheme::ApiKey)
}
