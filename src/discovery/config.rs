use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Configuration for the hosted web-search model used to find URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Service endpoint, e.g. `https://my-resource.openai.azure.com`
    /// (env: `AZURE_OPENAI_ENDPOINT`)
    pub endpoint: Option<String>,

    /// Model deployment name (env: `AZURE_OPENAI_DEPLOYMENT_NAME`, default: gpt-4-1)
    pub deployment: String,

    /// API version query parameter (default: 2025-03-01-preview)
    pub api_version: String,

    /// API key. Prefer leaving this unset and using `api_key_env`.
    pub api_key: Option<String>,

    /// Environment variable holding the API key (default: AZURE_OPENAI_API_KEY)
    pub api_key_env: String,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: "gpt-4-1".to_string(),
            api_version: "2025-03-01-preview".to_string(),
            api_key: None,
            api_key_env: "AZURE_OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

impl DiscoveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply `AZURE_OPENAI_ENDPOINT` and `AZURE_OPENAI_DEPLOYMENT_NAME`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = env::var("AZURE_OPENAI_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.endpoint = Some(endpoint);
            }
        }
        if let Ok(deployment) = env::var("AZURE_OPENAI_DEPLOYMENT_NAME") {
            if !deployment.trim().is_empty() {
                self.deployment = deployment;
            }
        }
        self
    }

    /// The configured key, falling back to the `api_key_env` variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
