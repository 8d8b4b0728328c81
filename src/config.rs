//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_RECOMPUTE_BACKOFF_MS,
    DEFAULT_RECOMPUTE_INTERVAL_SECONDS, DEFAULT_RECOMPUTE_MAX_ATTEMPTS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub ranking: RankingConfig,
    pub worker: WorkerConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Leaderboard recompute configuration
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Attempts per recompute before deferring to the next scheduled pass
    pub max_attempts: u32,
    /// Base retry backoff in milliseconds (doubled per attempt)
    pub backoff_ms: u64,
}

/// Recompute worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Seconds between scheduled full recomputes of active contests
    pub recompute_interval_seconds: u64,
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            ranking: RankingConfig::from_env()?,
            worker: WorkerConfig::from_env()?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl RankingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_attempts: env::var("RECOMPUTE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_RECOMPUTE_MAX_ATTEMPTS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECOMPUTE_MAX_ATTEMPTS".to_string()))?,
            backoff_ms: env::var("RECOMPUTE_BACKOFF_MS")
                .unwrap_or_else(|_| DEFAULT_RECOMPUTE_BACKOFF_MS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECOMPUTE_BACKOFF_MS".to_string()))?,
        })
    }
}

impl WorkerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            recompute_interval_seconds: env::var("RECOMPUTE_INTERVAL_SECONDS")
                .unwrap_or_else(|_| DEFAULT_RECOMPUTE_INTERVAL_SECONDS.to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("RECOMPUTE_INTERVAL_SECONDS".to_string())
                })?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_config_defaults() {
        // No env overrides set in the test environment for these keys
        unsafe {
            env::remove_var("RECOMPUTE_MAX_ATTEMPTS");
            env::remove_var("RECOMPUTE_BACKOFF_MS");
        }
        let config = RankingConfig::from_env().unwrap();
        assert_eq!(config.max_attempts, DEFAULT_RECOMPUTE_MAX_ATTEMPTS);
        assert_eq!(config.backoff_ms, DEFAULT_RECOMPUTE_BACKOFF_MS);
    }
}
