//! # Gleaner
//!
//! Concurrent page fetching and text extraction for web research.
//!
//! ## Architecture
//!
//! Gleaner follows a fan-out/fan-in pipeline:
//!
//! ```text
//! Query → Discovery → URLs → ParallelFetcher ─┬→ HttpFetcher → Extractor ─┐
//!                                             ├→ HttpFetcher → Extractor ─┼→ pages (input order)
//!                                             └→ ...                      ─┘
//! ```
//!
//! - [`discovery`]: turns a query into candidate URLs
//! - [`fetcher`]: fetches each page under a worker cap and reassembles results
//! - [`extractor`]: strips boilerplate markup and truncates text
//! - [`server`]: HTTP surface for the pipeline
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch specific pages
//! gleaner fetch https://blog.rust-lang.org/ https://www.rust-lang.org/ --max-chars 2000
//!
//! # Discover pages for a query, then fetch them
//! gleaner search "Latest Azure AI updates" --max-pages 5
//!
//! # Run the HTTP service
//! gleaner serve --port 8000
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration file handling
//! - [`domain`]: Request and result models
//! - [`discovery`]: URL discovery
//! - [`extractor`]: HTML to text
//! - [`fetcher`]: Single and parallel page fetching
//! - [`server`]: HTTP service

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// fetcher, parallel fetcher, discovery.
pub mod app;

/// Command-line interface using clap.
///
/// - `fetch <url>...` - Fetch the given URLs
/// - `search <query>` - Discover URLs for a query and fetch them
/// - `serve` - Run the HTTP service
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/gleaner/config.toml`.
pub mod config;

/// Candidate URL discovery.
pub mod discovery;

/// Request and result models.
///
/// - [`FetchResult`](domain::FetchResult): outcome for one URL
/// - [`SearchAndFetchResult`](domain::SearchAndFetchResult): aggregate response
/// - [`FetchBudget`](domain::FetchBudget): validated page/character budgets
pub mod domain;

/// HTML text extraction.
pub mod extractor;

/// Page fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for fetching one page
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent fetching with semaphore
pub mod fetcher;

/// HTTP service.
pub mod server;
