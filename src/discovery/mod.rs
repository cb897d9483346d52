//! Candidate URL discovery.
//!
//! Turns a free-text query into an ordered list of URLs for the
//! [`ParallelFetcher`](crate::fetcher::parallel::ParallelFetcher) to fetch.
//!
//! - [`UrlDiscovery`]: async trait implemented by every source
//! - [`ResponsesDiscovery`]: asks a hosted model with a web-search tool and
//!   harvests its URL citations
//! - [`StaticDiscovery`]: a fixed list, for callers that already have URLs

mod config;
pub mod responses;

pub use config::DiscoveryConfig;
pub use responses::ResponsesDiscovery;

use async_trait::async_trait;

use crate::app::Result;

#[async_trait]
pub trait UrlDiscovery {
    /// Candidate URLs for `query`, most relevant first, without duplicates.
    async fn discover(&self, query: &str) -> Result<Vec<String>>;
}

/// Returns the same URLs for every query.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    urls: Vec<String>,
}

impl StaticDiscovery {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl UrlDiscovery for StaticDiscovery {
    async fn discover(&self, _query: &str) -> Result<Vec<String>> {
        Ok(self.urls.clone())
    }
}
