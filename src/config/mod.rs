//! Configuration management for Gleaner.
//!
//! Configuration is read from `~/.config/gleaner/config.toml` at startup
//! (or the path given with `--config`). If the file doesn't exist, a
//! default configuration with comments is created.

use crate::discovery::DiscoveryConfig;
use crate::extractor::ExtractorConfig;
use crate::fetcher::FetcherConfig;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub extractor: ExtractorConfig,
    pub discovery: DiscoveryConfig,
    pub server: ServerConfig,
}

/// Listen address for `gleaner serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, bracketing IPv6 literals.
    pub fn address(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it if missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/gleaner/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gleaner").join("config.toml"))
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fetcher.validate().map_err(ConfigError::Invalid)?;

        for selector in &self.extractor.remove_selectors {
            if Selector::parse(selector).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "extractor.remove_selectors contains an invalid selector: {}",
                    selector
                )));
            }
        }

        if self.discovery.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "discovery.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gleaner Configuration

[fetcher]
# Maximum concurrent page fetches per request
workers = 10

# Per-page request timeout in seconds
timeout_secs = 15

# User agent sent with every page request
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"

# Characters kept per page when the caller does not specify a budget
max_chars_per_page = 10000

# Response bytes read per page before the rest is dropped
max_body_bytes = 5242880

[extractor]
# Elements removed (with everything inside them) before text extraction
remove_selectors = [
    "script",
    "style",
    "nav",
    "footer",
    "header",
    "aside",
    "iframe",
]

[discovery]
# Hosted model endpoint used by `gleaner search` and the HTTP service.
# Overridden by AZURE_OPENAI_ENDPOINT when set.
# endpoint = "https://my-resource.openai.azure.com"

# Model deployment (overridden by AZURE_OPENAI_DEPLOYMENT_NAME)
deployment = "gpt-4-1"

api_version = "2025-03-01-preview"

# Environment variable holding the API key
api_key_env = "AZURE_OPENAI_API_KEY"

timeout_secs = 60

[server]
host = "0.0.0.0"
port = 8000
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
