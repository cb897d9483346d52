use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::DEFAULT_MAX_CHARS_PER_PAGE;
use crate::fetcher::parallel::DEFAULT_WORKERS;

/// Configuration for page fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Maximum concurrent fetches per call (default: 10)
    pub workers: usize,

    /// Per-request timeout in seconds (default: 15)
    pub timeout_secs: u64,

    /// User agent sent with every request. Many sites reject empty or
    /// library-default agents.
    pub user_agent: String,

    /// Characters kept per page when a caller gives no budget (default: 10000)
    pub max_chars_per_page: usize,

    /// Response bytes read per page; the rest of the body is dropped
    /// (default: 5 MiB)
    pub max_body_bytes: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout_secs: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            max_chars_per_page: DEFAULT_MAX_CHARS_PER_PAGE,
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FetcherConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("fetcher.workers must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("fetcher.timeout_secs must be at least 1".to_string());
        }
        if self.max_body_bytes == 0 {
            return Err("fetcher.max_body_bytes must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("fetcher.user_agent must not be empty".to_string());
        }
        Ok(())
    }
}
