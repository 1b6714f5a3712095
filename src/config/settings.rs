//! Application settings and configuration management

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Image CDN base used when a poster path is relative.
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Poster shown when a movie has no poster path at all.
pub const PLACEHOLDER_POSTER_PATH: &str = "/placeholder-image.png";

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Streaming backend base URL
    pub server_url: String,
    /// Base URL for resolving relative poster paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Poster used when an entry has none
    #[serde(default = "default_placeholder_poster")]
    pub placeholder_poster: String,
}

fn default_image_base_url() -> String {
    TMDB_IMAGE_BASE_URL.to_string()
}

fn default_placeholder_poster() -> String {
    PLACEHOLDER_POSTER_PATH.to_string()
}

/// Error types for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(String),
    ValidationError(String),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::ParseError(s) => write!(f, "Parse error: {}", s),
            ConfigError::ValidationError(s) => write!(f, "Validation error: {}", s),
        }
    }
}

impl Error for ConfigError {}

impl Settings {
    /// Create default settings
    pub fn default() -> Self {
        Settings {
            server_url: "http://localhost:5000".to_string(),
            image_base_url: default_image_base_url(),
            placeholder_poster: default_placeholder_poster(),
        }
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("moviecli").join("config.json")
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "Server URL cannot be empty".to_string(),
            ));
        }

        Url::parse(&self.server_url).map_err(|e| {
            ConfigError::ValidationError(format!("Server URL is not a valid URL: {}", e))
        })?;

        Ok(())
    }
}
