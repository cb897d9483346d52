use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::app::{GleanerError, Result};
use crate::domain::FetchResult;
use crate::extractor::ContentExtractor;
use crate::fetcher::{charset, Fetcher, FetcherConfig};

pub struct HttpFetcher {
    client: Client,
    extractor: ContentExtractor,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig, extractor: ContentExtractor) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            extractor,
            max_body_bytes: config.max_body_bytes,
        })
    }

    async fn fetch_text(&self, url: &str, max_chars: usize) -> Result<String> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GleanerError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let mut response = self.client.get(parsed).send().await?;
        response.error_for_status_ref()?;

        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset::from_content_type);

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                tracing::debug!("Body of {} cut at {} bytes", url, self.max_body_bytes);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        let html = charset::decode(&body, declared);
        Ok(self.extractor.extract(&html, max_chars))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> FetchResult {
        tracing::debug!("Fetching {}", url);

        match self.fetch_text(url, max_chars).await {
            Ok(text) => {
                tracing::info!("Fetched {} chars from {}", text.chars().count(), url);
                FetchResult::fetched(url, text)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                FetchResult::failed(url, e.to_string())
            }
        }
    }
}
