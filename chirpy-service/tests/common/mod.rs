use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::ApiKeyGuard;
use auth::Authenticator;
use auth::HashParams;
use auth::PasswordHasher;
use chirpy_service::chirp::errors::ChirpError;
use chirpy_service::chirp::models::Chirp;
use chirpy_service::chirp::models::ChirpId;
use chirpy_service::chirp::ports::ChirpRepository;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::domain::admin::models::Platform;
use chirpy_service::domain::admin::service::AdminService;
use chirpy_service::inbound::http::metrics::HitCounter;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::session::errors::RefreshTokenError;
use chirpy_service::session::models::RefreshToken;
use chirpy_service::session::ports::RefreshTokenRepository;
use chirpy_service::session::service::SessionService;
use chirpy_service::user::errors::UserError;
use chirpy_service::user::models::EmailAddress;
use chirpy_service::user::models::User;
use chirpy_service::user::models::UserId;
use chirpy_service::user::ports::UserRepository;
use chirpy_service::user::service::UserService;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application on the dev platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Development).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());

        // Cheap hashing parameters keep the suite fast
        let password_hasher = PasswordHasher::with_params(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Invalid hash parameters");
        let authenticator =
            Arc::new(Authenticator::new(JWT_SECRET).with_password_hasher(password_hasher.clone()));

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&store), password_hasher)),
            chirp_service: Arc::new(ChirpService::new(Arc::clone(&store))),
            session_service: Arc::new(SessionService::new(
                authenticator,
                Arc::clone(&store),
                Arc::clone(&store),
                ApiKeyGuard::new(POLKA_KEY),
            )),
            admin_service: Arc::new(AdminService::new(
                platform,
                Arc::clone(&store),
                Arc::clone(&store),
            )),
            hits: HitCounter::new(),
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response `data` object
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the response `data` object
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

/// Storage shared by every repository port, with the same cascading
/// behaviour as the database schema.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<UserId, User>>,
    chirps: Mutex<Vec<Chirp>>,
    refresh_tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryStore {
    pub fn user(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }

    /// Shift a refresh token's expiry into the past
    pub fn expire_refresh_token(&self, token: &str) {
        if let Some(record) = self.refresh_tokens.lock().unwrap().get_mut(token) {
            record.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        match self.users.lock().unwrap().get_mut(id) {
            Some(user) => {
                user.is_chirpy_red = true;
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.users.lock().unwrap().clear();
        self.chirps.lock().unwrap().clear();
        self.refresh_tokens.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl ChirpRepository for InMemoryStore {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }

    async fn list(&self, author: Option<UserId>) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .filter(|c| author.map_or(true, |a| c.user_id == a))
            .cloned()
            .collect();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| &c.id != id);
        if chirps.len() == before {
            return Err(ChirpError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), ChirpError> {
        self.chirps.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryStore {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError> {
        Ok(self.refresh_tokens.lock().unwrap().get(token).cloned())
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), RefreshTokenError> {
        match self.refresh_tokens.lock().unwrap().get_mut(token) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(at);
                record.updated_at = at;
                Ok(())
            }
            _ => Err(RefreshTokenError::NotFound),
        }
    }
}

impl TestDb {
    /// Create a fresh, migrated database on the server named by `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset so repository tests can be
    /// skipped on machines without PostgreSQL.
    pub async fn from_env() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set, skipping PostgreSQL repository test");
            return None;
        };

        let db_name = format!(
            "test_chirpy_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
