pub mod charset;
pub mod config;
pub mod http_fetcher;
pub mod parallel;

pub use config::FetcherConfig;

use async_trait::async_trait;

use crate::domain::FetchResult;

/// Fetches one page and reduces it to readable text.
///
/// Implementations never fail: transport errors, bad statuses and decode
/// problems are reported through [`FetchResult::failed`].
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> FetchResult;
}
