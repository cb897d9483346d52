use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{GleanerError, Result};
use crate::discovery::{DiscoveryConfig, UrlDiscovery};

/// Finds URLs by asking a hosted model to answer the query with its
/// `web_search_preview` tool, then collecting the `url_citation`
/// annotations on its reply.
pub struct ResponsesDiscovery {
    client: Client,
    config: DiscoveryConfig,
}

impl ResponsesDiscovery {
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    fn responses_url(&self) -> Result<Url> {
        let endpoint = self.config.endpoint.as_deref().ok_or_else(|| {
            GleanerError::Discovery("no endpoint configured (set AZURE_OPENAI_ENDPOINT)".into())
        })?;

        let mut url = Url::parse(&format!(
            "{}/openai/responses",
            endpoint.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.config.api_version);
        Ok(url)
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    tools: [Tool; 1],
    input: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Annotation {
    UrlCitation { url: String },
    #[serde(other)]
    Other,
}

impl ResponsesReply {
    /// Cited URLs in first-seen order, duplicates removed.
    fn cited_urls(self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for item in self.output {
            let OutputItem::Message { content } = item else {
                continue;
            };
            for part in content {
                for annotation in part.annotations {
                    if let Annotation::UrlCitation { url } = annotation {
                        if seen.insert(url.clone()) {
                            urls.push(url);
                        }
                    }
                }
            }
        }

        urls
    }
}

#[async_trait]
impl UrlDiscovery for ResponsesDiscovery {
    async fn discover(&self, query: &str) -> Result<Vec<String>> {
        let url = self.responses_url()?;
        let api_key = self.config.resolve_api_key().ok_or_else(|| {
            GleanerError::Discovery(format!(
                "no API key configured (set {})",
                self.config.api_key_env
            ))
        })?;

        let request = ResponsesRequest {
            model: &self.config.deployment,
            tools: [Tool {
                kind: "web_search_preview",
            }],
            input: query,
        };

        tracing::debug!("Discovering URLs for {:?}", query);

        let response = self
            .client
            .post(url)
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GleanerError::Discovery(format!(
                "search model returned {}: {}",
                status,
                body.trim()
            )));
        }

        let body = response.text().await?;
        let reply: ResponsesReply = serde_json::from_str(&body)
            .map_err(|e| GleanerError::Discovery(format!("malformed search reply: {}", e)))?;

        let urls = reply.cited_urls();
        tracing::info!("Discovered {} URLs for {:?}", urls.len(), query);
        Ok(urls)
    }
}
