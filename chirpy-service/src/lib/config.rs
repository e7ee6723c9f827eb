use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::admin::models::Platform;

/// Longest accepted access token lifetime (30 days).
pub const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Longest accepted refresh token lifetime (10 years).
pub const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 10 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
    pub webhooks: WebhookConfig,
    pub platform: Platform,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub expiration_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub refresh_token_ttl_days: i64,
}

/// Argon2id cost parameters for newly hashed passwords.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub api_key: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, PLATFORM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for everything except secrets and the database url
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "production".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("platform", "prod")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8080)?
            .set_default("server.static_dir", "static")?
            .set_default("jwt.issuer", auth::jwt::codec::DEFAULT_ISSUER)?
            .set_default(
                "jwt.expiration_seconds",
                auth::authenticator::DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            )?
            .set_default("session.refresh_token_ttl_days", 60)?
            .set_default("password.memory_kib", 19 * 1024)?
            .set_default("password.iterations", 2)?
            .set_default("password.parallelism", 1)?
            .set_default("webhooks.api_key", "")?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.jwt.expiration_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_seconds must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_SECONDS
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.session.refresh_token_ttl_days) {
            return Err(ConfigError::Message(format!(
                "session.refresh_token_ttl_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_TTL_DAYS
            )));
        }
        if self.webhooks.api_key.is_empty() {
            tracing::warn!("webhooks.api_key is empty, webhook calls will be rejected");
        }
        Ok(())
    }
}
