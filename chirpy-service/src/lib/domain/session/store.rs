use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use crate::session::errors::RefreshTokenError;
use crate::session::models::RefreshToken;
use crate::session::ports::RefreshTokenRepository;
use crate::user::models::UserId;

/// Default refresh token lifetime.
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Issues, resolves and revokes opaque refresh tokens.
///
/// Holds no state of its own. Every operation is a single repository call, so
/// a token is visible to `resolve_owner` as soon as `create` returns and a
/// successful `revoke` is seen by every later `resolve_owner`.
pub struct RefreshTokenStore<R>
where
    R: RefreshTokenRepository,
{
    repository: Arc<R>,
}

impl<R> RefreshTokenStore<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Generate and persist a new token owned by `owner`, valid for `ttl`.
    ///
    /// Each call yields a distinct token.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` pushes the expiry past the representable range
    pub async fn create(
        &self,
        owner: &UserId,
        ttl: Duration,
    ) -> Result<RefreshToken, RefreshTokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| RefreshTokenError::InvalidLifetime(ttl.to_string()))?;
        let token = RefreshToken {
            token: auth::generate_refresh_token(),
            user_id: *owner,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        };

        self.repository.create(token).await
    }

    /// Return the owner of a live token.
    ///
    /// # Errors
    /// * `NotFound` - Token was never issued
    /// * `Revoked` - Token has been revoked
    /// * `Expired` - Token is past its expiry
    pub async fn resolve_owner(&self, token: &str) -> Result<UserId, RefreshTokenError> {
        let record = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or(RefreshTokenError::NotFound)?;

        if record.is_revoked() {
            return Err(RefreshTokenError::Revoked);
        }
        if record.is_expired_at(Utc::now()) {
            return Err(RefreshTokenError::Expired);
        }

        Ok(record.user_id)
    }

    /// Revoke a token. Revoking an unknown or already revoked token is
    /// `NotFound`.
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        self.repository.revoke(token, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;

    use super::*;

    #[derive(Default)]
    struct InMemoryRefreshTokens {
        tokens: Mutex<HashMap<String, RefreshToken>>,
    }

    #[async_trait]
    impl RefreshTokenRepository for InMemoryRefreshTokens {
        async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
            self.tokens
                .lock()
                .unwrap()
                .insert(token.token.clone(), token.clone());
            Ok(token)
        }

        async fn find_by_token(
            &self,
            token: &str,
        ) -> Result<Option<RefreshToken>, RefreshTokenError> {
            Ok(self.tokens.lock().unwrap().get(token).cloned())
        }

        async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), RefreshTokenError> {
            match self.tokens.lock().unwrap().get_mut(token) {
                Some(record) if record.revoked_at.is_none() => {
                    record.revoked_at = Some(at);
                    record.updated_at = at;
                    Ok(())
                }
                _ => Err(RefreshTokenError::NotFound),
            }
        }
    }

    fn store() -> RefreshTokenStore<InMemoryRefreshTokens> {
        RefreshTokenStore::new(Arc::new(InMemoryRefreshTokens::default()))
    }

    #[tokio::test]
    async fn test_create_then_resolve_owner() {
        let store = store();
        let owner = UserId::new();

        let token = store.create(&owner, Duration::days(60)).await.unwrap();

        assert_eq!(token.token.len(), 64);
        assert!(token.expires_at > token.created_at);
        assert_eq!(store.resolve_owner(&token.token).await, Ok(owner));
    }

    #[tokio::test]
    async fn test_tokens_are_distinct() {
        let store = store();
        let owner = UserId::new();

        let first = store.create(&owner, Duration::days(1)).await.unwrap();
        let second = store.create(&owner, Duration::days(1)).await.unwrap();

        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn test_unknown_token_not_found() {
        assert_eq!(
            store().resolve_owner("deadbeef").await,
            Err(RefreshTokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_revoked_token_cannot_be_resolved() {
        let store = store();
        let token = store.create(&UserId::new(), Duration::days(60)).await.unwrap();

        store.revoke(&token.token).await.unwrap();

        assert_eq!(
            store.resolve_owner(&token.token).await,
            Err(RefreshTokenError::Revoked)
        );
    }

    #[tokio::test]
    async fn test_revoking_twice_is_not_found() {
        let store = store();
        let token = store.create(&UserId::new(), Duration::days(60)).await.unwrap();

        store.revoke(&token.token).await.unwrap();

        assert_eq!(
            store.revoke(&token.token).await,
            Err(RefreshTokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_rejected() {
        let repository = Arc::new(InMemoryRefreshTokens::default());
        let store = RefreshTokenStore::new(Arc::clone(&repository));

        let result = store
            .create(&UserId::new(), Duration::seconds(10_000_000_000_000))
            .await;

        assert!(matches!(result, Err(RefreshTokenError::InvalidLifetime(_))));
        assert!(repository.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_cannot_be_resolved() {
        let store = store();
        let token = store
            .create(&UserId::new(), Duration::seconds(-1))
            .await
            .unwrap();

        assert_eq!(
            store.resolve_owner(&token.token).await,
            Err(RefreshTokenError::Expired)
        );
    }
}
