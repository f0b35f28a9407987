//! Runtime configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_LOG_FILE, DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_SECS, ENV_API_URL,
    ENV_LOG_FILE, ENV_LOG_FILTER, ENV_TIMEOUT_SECS,
};
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the collection endpoint
    pub api_url: Url,
    pub timeout: Duration,
    pub log_file: PathBuf,
    /// EnvFilter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from `.env` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = value(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let timeout_secs = value(ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(AppConfig {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            log_file: value(ENV_LOG_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_filter: value(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Directory and file name for the log appender
    pub fn log_location(&self) -> (PathBuf, PathBuf) {
        let dir = match self.log_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = self
            .log_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        (dir, file)
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".into()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(url)
}
