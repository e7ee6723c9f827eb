use thiserror::Error;

use crate::chirp::errors::ChirpError;
use crate::user::errors::UserError;

#[derive(Debug, Clone, Error)]
pub enum AdminError {
    #[error("Operation is only available on the dev platform")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for AdminError {
    fn from(err: UserError) -> Self {
        AdminError::DatabaseError(err.to_string())
    }
}

impl From<ChirpError> for AdminError {
    fn from(err: ChirpError) -> Self {
        AdminError::DatabaseError(err.to_string())
    }
}
