use async_trait::async_trait;

use crate::domain::admin::errors::AdminError;

/// Port for administrative operations.
#[async_trait]
pub trait AdminServicePort: Send + Sync + 'static {
    /// Delete every user and chirp. Refresh tokens are removed with their
    /// owners.
    ///
    /// # Errors
    /// * `Forbidden` - Platform is not `dev`
    /// * `DatabaseError` - Database operation failed
    async fn reset(&self) -> Result<(), AdminError>;
}
