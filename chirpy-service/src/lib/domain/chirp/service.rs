use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::ChirpId;
use crate::chirp::models::SortDirection;
use crate::chirp::ports::ChirpRepository;
use crate::chirp::ports::ChirpServicePort;
use crate::user::models::UserId;

/// Domain service implementation for chirp operations.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, author: &UserId, body: ChirpBody) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body,
            user_id: *author,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(chirp).await
    }

    async fn list_chirps(
        &self,
        author: Option<UserId>,
        sort: SortDirection,
    ) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.repository.list(author).await?;
        if sort == SortDirection::Desc {
            chirps.reverse();
        }
        Ok(chirps)
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id.to_string()))
    }

    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != *requester {
            tracing::warn!(chirp_id = %id, user_id = %requester, "Refusing to delete chirp of another user");
            return Err(ChirpError::Forbidden(id.to_string()));
        }

        self.repository.delete(id).await
    }
}
