//! Configuration module for the admin client.
//!
//! All configuration is loaded from environment variables. Exactly one API
//! base URL is accepted; construction fails without it.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the marketplace API (required)
    pub api_url: Url,
    /// Path to the persisted session file
    pub session_path: PathBuf,
    /// How long a cached list read stays fresh
    pub cache_ttl: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("CARDIKHAO_API_URL")
            .map_err(|_| AppError::Config("CARDIKHAO_API_URL must be set".to_string()))?;
        let api_url = Url::parse(&api_url)
            .map_err(|e| AppError::Config(format!("Invalid CARDIKHAO_API_URL: {}", e)))?;

        let session_path = env::var("CARDIKHAO_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let cache_ttl_secs = match env::var("CARDIKHAO_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Config("Invalid CARDIKHAO_CACHE_TTL_SECS".to_string()))?,
            Err(_) => 30,
        };

        let log_level = env::var("CARDIKHAO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_url,
            session_path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            log_level,
        })
    }
}
