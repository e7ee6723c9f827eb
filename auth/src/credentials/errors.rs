use thiserror::Error;

/// Error type for credential extraction from request headers.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Missing credential")]
    Missing,

    #[error("Malformed credential, expected: {expected} <value>")]
    Malformed { expected: &'static str },
}
