use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{GleanerError, Result};
use crate::domain::{FetchBudget, FetchResult, SearchAndFetchResult};
use crate::fetcher::Fetcher;

pub const DEFAULT_WORKERS: usize = 10;

/// Fans page fetches out over a bounded worker pool and reassembles the
/// results in input order.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    workers: usize,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            workers: DEFAULT_WORKERS,
        }
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(GleanerError::InvalidInput(
                "worker count must be at least 1".into(),
            ));
        }
        Ok(Self { fetcher, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetch the budgeted prefix of `urls` and summarize the outcome.
    ///
    /// `total_found` counts every candidate in `urls`, including the ones
    /// the page budget cut off.
    pub async fn search_and_fetch(
        &self,
        query: &str,
        urls: &[String],
        budget: &FetchBudget,
    ) -> SearchAndFetchResult {
        let urls_to_fetch = budget.select(urls);
        let pages = self
            .fetch_all(urls_to_fetch, budget.max_chars_per_page)
            .await;

        let result = SearchAndFetchResult::new(query, pages, urls.len());
        tracing::info!(
            "Fetched {}/{} pages for {:?} ({} candidates)",
            result.total_fetched,
            result.pages.len(),
            query,
            result.total_found
        );
        result
    }

    /// Fetch every URL concurrently, at most `min(workers, urls.len())` at
    /// a time. The returned vector is index-aligned with `urls`.
    pub async fn fetch_all(&self, urls: &[String], max_chars: usize) -> Vec<FetchResult> {
        if urls.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.workers.min(urls.len())));
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let fetcher = self.fetcher.clone();
            let semaphore = semaphore.clone();
            let url = url.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => return FetchResult::failed(url, format!("worker pool closed: {}", e)),
                };

                fetcher.fetch(&url, max_chars).await
            });

            handles.push(handle);
        }

        // Handles are joined in spawn order, so completion order never
        // leaks into the output.
        join_all(handles)
            .await
            .into_iter()
            .zip(urls)
            .map(|(joined, url)| match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Task join error for {}: {}", url, e);
                    FetchResult::failed(url.as_str(), format!("fetch task failed: {}", e))
                }
            })
            .collect()
    }
}
