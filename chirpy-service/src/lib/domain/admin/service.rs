use std::sync::Arc;

use async_trait::async_trait;

use crate::chirp::ports::ChirpRepository;
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::models::Platform;
use crate::domain::admin::ports::AdminServicePort;
use crate::user::ports::UserRepository;

pub struct AdminService<UR, CR>
where
    UR: UserRepository,
    CR: ChirpRepository,
{
    platform: Platform,
    user_repository: Arc<UR>,
    chirp_repository: Arc<CR>,
}

impl<UR, CR> AdminService<UR, CR>
where
    UR: UserRepository,
    CR: ChirpRepository,
{
    pub fn new(platform: Platform, user_repository: Arc<UR>, chirp_repository: Arc<CR>) -> Self {
        Self {
            platform,
            user_repository,
            chirp_repository,
        }
    }
}

#[async_trait]
impl<UR, CR> AdminServicePort for AdminService<UR, CR>
where
    UR: UserRepository,
    CR: ChirpRepository,
{
    async fn reset(&self) -> Result<(), AdminError> {
        if !self.platform.allows_reset() {
            return Err(AdminError::Forbidden);
        }

        self.chirp_repository.delete_all().await?;
        self.user_repository.delete_all().await?;

        tracing::warn!("All users and chirps deleted");
        Ok(())
    }
}
