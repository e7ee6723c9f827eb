use async_trait::async_trait;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::ChirpId;
use crate::chirp::models::SortDirection;
use crate::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Publish a chirp on behalf of an authenticated user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, author: &UserId, body: ChirpBody) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally restricted to one author.
    ///
    /// # Arguments
    /// * `author` - Only return chirps by this user
    /// * `sort` - Order by creation time
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_chirps(
        &self,
        author: Option<UserId>,
        sort: SortDirection,
    ) -> Result<Vec<Chirp>, ChirpError>;

    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// Delete a chirp owned by `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - Requester is not the author
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Chirps ordered by creation time, oldest first.
    async fn list(&self, author: Option<UserId>) -> Result<Vec<Chirp>, ChirpError>;

    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;

    async fn delete_all(&self) -> Result<(), ChirpError>;
}
