use std::sync::Arc;

use crate::app::error::{GleanerError, Result};
use crate::config::Config;
use crate::discovery::{ResponsesDiscovery, UrlDiscovery};
use crate::domain::{FetchBudget, SearchAndFetchResult};
use crate::extractor::ContentExtractor;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;

/// Everything one process needs to serve requests. Built once from a
/// [`Config`] and passed around explicitly.
pub struct AppContext {
    pub config: Config,
    pub parallel_fetcher: ParallelFetcher,
    pub discovery: Arc<dyn UrlDiscovery + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GleanerError::Config(e.to_string()))?;

        let extractor = ContentExtractor::new(&config.extractor)?;
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(&config.fetcher, extractor)?);
        let discovery: Arc<dyn UrlDiscovery + Send + Sync> = Arc::new(ResponsesDiscovery::new(
            config.discovery.clone().with_env_overrides(),
        )?);

        Self::with_components(config, fetcher, discovery)
    }

    /// Wire a context from already-built parts.
    pub fn with_components(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        discovery: Arc<dyn UrlDiscovery + Send + Sync>,
    ) -> Result<Self> {
        let parallel_fetcher = ParallelFetcher::with_workers(fetcher, config.fetcher.workers)?;

        Ok(Self {
            config,
            parallel_fetcher,
            discovery,
        })
    }

    /// Budget used when a caller gives none.
    pub fn default_budget(&self) -> FetchBudget {
        FetchBudget {
            max_pages: None,
            max_chars_per_page: self.config.fetcher.max_chars_per_page,
        }
    }

    /// Fetch caller-supplied URLs.
    pub async fn fetch_urls(
        &self,
        query: &str,
        urls: &[String],
        budget: &FetchBudget,
    ) -> SearchAndFetchResult {
        self.parallel_fetcher
            .search_and_fetch(query, urls, budget)
            .await
    }

    /// Discover URLs for `query`, then fetch them.
    pub async fn search_and_fetch(
        &self,
        query: &str,
        budget: &FetchBudget,
    ) -> Result<SearchAndFetchResult> {
        let urls = self.discovery.discover(query).await?;
        Ok(self.fetch_urls(query, &urls, budget).await)
    }
}
