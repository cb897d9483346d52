use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::app::AppContext;
use gleaner::cli::{commands, Cli, Commands};
use gleaner::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(workers) = cli.workers {
        config.fetcher.workers = workers;
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Fetch {
            urls,
            query,
            max_pages,
            max_chars,
        } => {
            commands::fetch_urls(&ctx, &query, &urls, max_pages, max_chars).await?;
        }
        Commands::Search {
            query,
            max_pages,
            max_chars,
        } => {
            commands::search(&ctx, &query, max_pages, max_chars).await?;
        }
        Commands::Serve { host, port } => {
            commands::serve(Arc::new(ctx), host, port).await?;
        }
    }

    Ok(())
}
