use std::io::{self, Write};
use std::sync::Arc;

use crate::app::{AppContext, Result};
use crate::domain::{FetchBudget, SearchAndFetchResult};
use crate::server;

fn budget(ctx: &AppContext, max_pages: Option<usize>, max_chars: Option<usize>) -> FetchBudget {
    let default = ctx.default_budget();
    FetchBudget {
        max_pages,
        max_chars_per_page: max_chars.unwrap_or(default.max_chars_per_page),
    }
}

pub async fn fetch_urls(
    ctx: &AppContext,
    query: &str,
    urls: &[String],
    max_pages: Option<usize>,
    max_chars: Option<usize>,
) -> Result<()> {
    let budget = budget(ctx, max_pages, max_chars);
    let result = ctx.fetch_urls(query, urls, &budget).await;
    print_result(&result)
}

pub async fn search(
    ctx: &AppContext,
    query: &str,
    max_pages: Option<usize>,
    max_chars: Option<usize>,
) -> Result<()> {
    let budget = budget(ctx, max_pages, max_chars);
    let result = ctx.search_and_fetch(query, &budget).await?;
    print_result(&result)
}

pub async fn serve(ctx: Arc<AppContext>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server_config = ctx.config.server.clone();
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        server_config.port = port;
    }

    server::serve(ctx, &server_config.address()).await
}

fn print_result(result: &SearchAndFetchResult) -> Result<()> {
    write_result(result, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// JSON result to `out`; per-page failures and a summary line to `log`.
fn write_result(
    result: &SearchAndFetchResult,
    out: &mut impl Write,
    log: &mut impl Write,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;

    for page in result.pages.iter().filter(|p| !p.is_success()) {
        writeln!(log, "  ! {} - {}", page.url(), page.error().unwrap_or_default())?;
    }
    writeln!(
        log,
        "Fetch complete: {} of {} pages ({} failed, {} candidates)",
        result.total_fetched,
        result.pages.len(),
        result.total_failed(),
        result.total_found
    )?;

    Ok(())
}
