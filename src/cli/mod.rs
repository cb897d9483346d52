pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(about = "Fetch web pages concurrently and extract their text", long_about = None)]
pub struct Cli {
    /// Number of parallel workers for fetching pages (overrides the config file)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Path to the config file (default: ~/.config/gleaner/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the given URLs and print the extracted text as JSON
    Fetch {
        /// URLs to fetch, in the order results should be reported
        #[arg(required = true)]
        urls: Vec<String>,

        /// Query string echoed back in the result
        #[arg(short, long, default_value = "")]
        query: String,

        /// Fetch at most this many of the URLs
        #[arg(long)]
        max_pages: Option<usize>,

        /// Characters kept per page
        #[arg(long)]
        max_chars: Option<usize>,
    },
    /// Discover URLs for a query, fetch them, and print the result as JSON
    Search {
        /// What to search for
        query: String,

        /// Fetch at most this many of the discovered URLs
        #[arg(long)]
        max_pages: Option<usize>,

        /// Characters kept per page
        #[arg(long)]
        max_chars: Option<usize>,
    },
    /// Run the HTTP service
    Serve {
        /// Address to bind (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
