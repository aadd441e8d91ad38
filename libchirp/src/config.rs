//! Configuration management for Chirp

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub posts: PostsConfig,
    pub rate_limit: RateLimitConfig,
    pub web: WebConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Maximum post length in characters
    pub max_length: usize,
    /// Maximum number of posts returned by a feed query
    pub feed_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Posts allowed per author in one window
    pub max_posts: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind_addr: String,
    pub site_name: String,
    /// How long a page render waits for a feed before showing the loading state
    pub feed_wait_ms: u64,
    /// Lifetime of cached feed query results
    pub query_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header set by the upstream auth proxy carrying the signed-in user id
    pub user_header: String,
    pub sign_in_url: String,
    pub sign_out_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "~/.local/share/chirp/chirp.db".to_string(),
        }
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            max_length: 280,
            feed_limit: 100,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_posts: 1,
            window_secs: 60,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            site_name: "Chirp".to_string(),
            feed_wait_ms: 3000,
            query_ttl_secs: 30,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: "x-chirp-user-id".to_string(),
            sign_in_url: "/sign-in".to_string(),
            sign_out_url: "/sign-out".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::info!(path = %config_path.display(), "no config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Resolve the configuration file path following the XDG Base Directory layout
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHIRP_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("chirp").join("config.toml"))
}

/// Expand `~` in the configured database path
pub fn resolve_db_path(path: &str) -> Result<PathBuf> {
    if path.trim().is_empty() {
        return Err(ConfigError::MissingField("database.path".to_string()).into());
    }
    Ok(PathBuf::from(shellexpand::tilde(path).to_string()))
}
