use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::session::errors::SessionError;
use crate::session::models::Session;
use crate::session::models::SessionTokens;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::session::store::RefreshTokenStore;
use crate::session::store::DEFAULT_REFRESH_TOKEN_TTL_DAYS;
use crate::user::models::EmailAddress;
use crate::user::models::Password;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for session lifecycle operations.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    authenticator: Arc<auth::Authenticator>,
    user_repository: Arc<UR>,
    refresh_tokens: RefreshTokenStore<RR>,
    api_key_guard: auth::ApiKeyGuard,
    refresh_token_ttl: Duration,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `authenticator` - Password verification and access token issuance
    /// * `user_repository` - Lookup of users by email during login
    /// * `refresh_token_repository` - Refresh token persistence
    /// * `api_key_guard` - Expected key of the webhook caller
    pub fn new(
        authenticator: Arc<auth::Authenticator>,
        user_repository: Arc<UR>,
        refresh_token_repository: Arc<RR>,
        api_key_guard: auth::ApiKeyGuard,
    ) -> Self {
        Self {
            authenticator,
            user_repository,
            refresh_tokens: RefreshTokenStore::new(refresh_token_repository),
            api_key_guard,
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS),
        }
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<Session, SessionError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(SessionError::InvalidCredentials)?;

        let authenticator = Arc::clone(&self.authenticator);
        let candidate = password.as_str().to_string();
        let stored_hash = user.password_hash.clone();
        tokio::task::spawn_blocking(move || {
            authenticator.verify_credentials(&candidate, &stored_hash)
        })
        .await
        .map_err(|e| SessionError::Task(e.to_string()))??;

        let tokens = self.issue_session(&user.id).await?;

        tracing::info!(user_id = %user.id, "Session started");

        Ok(Session { user, tokens })
    }

    async fn issue_session(&self, user_id: &UserId) -> Result<SessionTokens, SessionError> {
        let access_token = self.authenticator.issue_access_token(user_id.0)?;
        let refresh_token = self
            .refresh_tokens
            .create(user_id, self.refresh_token_ttl)
            .await?;

        Ok(SessionTokens {
            access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn authenticate(&self, authorization: &str) -> Result<UserId, SessionError> {
        let token = auth::extract_bearer_token(authorization)?;
        let subject = self.authenticator.validate_access_token(token)?;
        Ok(UserId(subject))
    }

    async fn refresh_session(&self, authorization: &str) -> Result<String, SessionError> {
        let token = auth::extract_bearer_token(authorization)?;
        let owner = self.refresh_tokens.resolve_owner(token).await?;
        Ok(self.authenticator.issue_access_token(owner.0)?)
    }

    async fn end_session(&self, authorization: &str) -> Result<(), SessionError> {
        let token = auth::extract_bearer_token(authorization)?;
        self.refresh_tokens.revoke(token).await?;
        tracing::info!("Refresh token revoked");
        Ok(())
    }

    async fn verify_server_callback(&self, authorization: &str) -> bool {
        match auth::extract_api_key(authorization) {
            Ok(key) => self.api_key_guard.check(key),
            Err(e) => {
                tracing::warn!(error = %e, "Server callback without usable API key");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::session::errors::RefreshTokenError;
    use crate::session::models::RefreshToken;
    use crate::user::errors::UserError;
    use crate::user::models::User;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError>;
            async fn delete_all(&self) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;
            async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;
            async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), RefreshTokenError>;
        }
    }

    fn authenticator() -> Arc<auth::Authenticator> {
        let hasher = auth::PasswordHasher::with_params(auth::HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Arc::new(auth::Authenticator::new(SECRET).with_password_hasher(hasher))
    }

    fn service(
        users: MockTestUserRepository,
        tokens: MockTestRefreshTokenRepository,
    ) -> SessionService<MockTestUserRepository, MockTestRefreshTokenRepository> {
        SessionService::new(
            authenticator(),
            Arc::new(users),
            Arc::new(tokens),
            auth::ApiKeyGuard::new("f271c81ff7084ee5b99a5091b42d486e"),
        )
    }

    fn registered_user(password: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            password_hash: authenticator().hash_password(password).unwrap(),
            is_chirpy_red: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stored_token(owner: UserId) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "a".repeat(64),
            user_id: owner,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(60),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_login_issues_distinct_tokens() {
        let user = registered_user("s3cr3t!");
        let user_id = user.id;

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens
            .expect_create()
            .withf(move |token| token.user_id == user_id && token.revoked_at.is_none())
            .times(1)
            .returning(|token| Ok(token));

        let service = service(users, tokens);

        let session = service
            .login(
                &EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
                &Password::new("s3cr3t!".to_string()).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(session.user.id, user_id);
        assert!(!session.tokens.access_token.is_empty());
        assert_eq!(session.tokens.refresh_token.len(), 64);
        assert_ne!(session.tokens.access_token, session.tokens.refresh_token);

        let header = format!("Bearer {}", session.tokens.access_token);
        assert_eq!(service.authenticate(&header).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_issue_session_tokens_resolve_to_the_same_user() {
        let user_id = UserId::new();
        let created: Arc<std::sync::Mutex<Option<RefreshToken>>> = Arc::default();

        let mut tokens = MockTestRefreshTokenRepository::new();
        let sink = Arc::clone(&created);
        tokens
            .expect_create()
            .withf(move |token| token.user_id == user_id)
            .times(1)
            .returning(move |token| {
                *sink.lock().unwrap() = Some(token.clone());
                Ok(token)
            });
        let source = Arc::clone(&created);
        tokens
            .expect_find_by_token()
            .times(1)
            .returning(move |token| {
                Ok(source
                    .lock()
                    .unwrap()
                    .clone()
                    .filter(|stored| stored.token == token))
            });

        let service = service(MockTestUserRepository::new(), tokens);

        let issued = service.issue_session(&user_id).await.unwrap();
        assert_ne!(issued.access_token, issued.refresh_token);

        let header = format!("Bearer {}", issued.access_token);
        assert_eq!(service.authenticate(&header).await.unwrap(), user_id);

        let header = format!("Bearer {}", issued.refresh_token);
        let refreshed = service.refresh_session(&header).await.unwrap();
        let header = format!("Bearer {}", refreshed);
        assert_eq!(service.authenticate(&header).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_issue_session_with_out_of_range_ttl_fails() {
        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens.expect_create().times(0);

        let service = service(MockTestUserRepository::new(), tokens)
            .with_refresh_token_ttl(Duration::seconds(10_000_000_000_000));

        let err = service.issue_session(&UserId::new()).await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::RefreshToken(RefreshTokenError::InvalidLifetime(_))
        ));
        assert!(!err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = registered_user("s3cr3t!");

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens.expect_create().times(0);

        let result = service(users, tokens)
            .login(
                &EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
                &Password::new("wrong".to_string()).unwrap(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users, MockTestRefreshTokenRepository::new())
            .login(
                &EmailAddress::new("nobody@example.com".to_string()).unwrap(),
                &Password::new("s3cr3t!".to_string()).unwrap(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_missing_and_malformed_headers() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
        );

        for header in ["", "Token abc", "Bearer ", "Bearer not.a.jwt"] {
            let err = service.authenticate(header).await.unwrap_err();
            assert!(err.is_unauthorized(), "{header:?} should be unauthorized");
        }
    }

    #[tokio::test]
    async fn test_refresh_session_issues_access_token_for_owner() {
        let owner = UserId::new();

        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens
            .expect_find_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored_token(owner))));

        let service = service(MockTestUserRepository::new(), tokens);

        let header = format!("Bearer {}", "a".repeat(64));
        let access_token = service.refresh_session(&header).await.unwrap();

        let header = format!("Bearer {}", access_token);
        assert_eq!(service.authenticate(&header).await.unwrap(), owner);
    }

    #[tokio::test]
    async fn test_refresh_session_with_revoked_token() {
        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens.expect_find_by_token().returning(|_| {
            let mut token = stored_token(UserId::new());
            token.revoked_at = Some(Utc::now());
            Ok(Some(token))
        });

        let err = service(MockTestUserRepository::new(), tokens)
            .refresh_session(&format!("Bearer {}", "a".repeat(64)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::RefreshToken(RefreshTokenError::Revoked)
        ));
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_end_session_revokes_presented_token() {
        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens
            .expect_revoke()
            .withf(|token, _| token == "abc123")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(MockTestUserRepository::new(), tokens);

        assert!(service.end_session("Bearer abc123").await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_unauthorized() {
        let mut tokens = MockTestRefreshTokenRepository::new();
        tokens
            .expect_revoke()
            .returning(|_, _| Err(RefreshTokenError::DatabaseError("pool timed out".to_string())));

        let err = service(MockTestUserRepository::new(), tokens)
            .end_session("Bearer abc123")
            .await
            .unwrap_err();

        assert!(!err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_verify_server_callback() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
        );

        assert!(
            service
                .verify_server_callback("ApiKey f271c81ff7084ee5b99a5091b42d486e")
                .await
        );
        assert!(!service.verify_server_callback("ApiKey wrong").await);
        assert!(
            !service
                .verify_server_callback("Bearer f271c81ff7084ee5b99a5091b42d486e")
                .await
        );
        assert!(!service.verify_server_callback("").await);
    }
}
