use serde::{Deserialize, Serialize};
use std::env;

/// Token lifetime when TOKEN_EXPIRY_SECS is not set: one hour.
const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_expiry_secs: u64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// DATABASE_URL and JWT_SECRET are required; everything else has a
    /// working default and can be overridden per variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            server: ServerConfig {
                port: env_parsed("PORT", 4000),
            },
            database: DatabaseConfig {
                url,
                max_connections: env_parsed("DATABASE_MAX_CONNECTIONS", 10),
                connect_timeout_secs: env_parsed("DATABASE_CONNECT_TIMEOUT", 30),
            },
            security: SecurityConfig {
                jwt_secret,
                token_expiry_secs: env_parsed("TOKEN_EXPIRY_SECS", DEFAULT_TOKEN_EXPIRY_SECS),
                bcrypt_cost: env_parsed("BCRYPT_COST", bcrypt::DEFAULT_COST),
            },
        })
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
