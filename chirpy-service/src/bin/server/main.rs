use std::path::PathBuf;
use std::sync::Arc;

use auth::AccessTokenCodec;
use auth::ApiKeyGuard;
use auth::Authenticator;
use auth::HashParams;
use auth::PasswordHasher;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::config::Config;
use chirpy_service::domain::admin::service::AdminService;
use chirpy_service::inbound::http::metrics::HitCounter;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::outbound::repositories::PostgresChirpRepository;
use chirpy_service::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy_service::outbound::repositories::PostgresUserRepository;
use chirpy_service::session::service::SessionService;
use chirpy_service::user::service::UserService;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        platform = ?config.platform,
        jwt_issuer = %config.jwt.issuer,
        access_token_ttl_seconds = config.jwt.expiration_seconds,
        refresh_token_ttl_days = config.session.refresh_token_ttl_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(HashParams {
        memory_kib: config.password.memory_kib,
        iterations: config.password.iterations,
        parallelism: config.password.parallelism,
    })?;
    let secret = config.jwt.secret.as_bytes();
    let authenticator = Arc::new(
        Authenticator::new(secret)
            .with_password_hasher(password_hasher.clone())
            .with_token_codec(AccessTokenCodec::with_issuer(secret, &config.jwt.issuer))
            .with_access_token_ttl(Duration::seconds(config.jwt.expiration_seconds)),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            password_hasher,
        )),
        chirp_service: Arc::new(ChirpService::new(Arc::clone(&chirp_repository))),
        session_service: Arc::new(
            SessionService::new(
                authenticator,
                Arc::clone(&user_repository),
                refresh_token_repository,
                ApiKeyGuard::new(config.webhooks.api_key.clone()),
            )
            .with_refresh_token_ttl(Duration::days(config.session.refresh_token_ttl_days)),
        ),
        admin_service: Arc::new(AdminService::new(
            config.platform,
            user_repository,
            chirp_repository,
        )),
        hits: HitCounter::new(),
        static_dir: PathBuf::from(&config.server.static_dir),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}
