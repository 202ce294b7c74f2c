//! Siphon main entry point
//!
//! Command-line driver for the crawl engine. Records and stream events are
//! printed to stdout as JSON; logs go to stderr so output stays pipeable.

use clap::{Parser, Subcommand};
use siphon::config::load_config;
use siphon::{Config, Engine, PageLimit};
use std::path::PathBuf;
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

/// Siphon: a web crawling and article-extraction engine
///
/// Given a seed URL, Siphon fetches pages, extracts readable article
/// content, and follows same-domain links - one page, a bounded batch, or
/// a live event stream.
#[derive(Parser, Debug)]
#[command(name = "siphon")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a website and extract article content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and extract exactly one page, without following links
    Single {
        /// The page URL
        url: String,

        /// Per-request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Crawl from the seed and print all records once the crawl finishes
    Batch {
        /// The seed URL
        url: String,

        /// Maximum number of pages to crawl
        #[arg(short = 'n', long, default_value_t = 100)]
        max_pages: usize,

        /// Per-request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Crawl from the seed, printing one JSON event per line as it happens
    Stream {
        /// The seed URL
        url: String,

        /// Maximum number of pages to crawl
        #[arg(short = 'n', long, conflicts_with = "unbounded")]
        max_pages: Option<usize>,

        /// No page budget; the configured time ceiling applies instead
        #[arg(long)]
        unbounded: bool,

        /// Per-request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let engine = Engine::new(config);

    match cli.command {
        Command::Single { url, timeout } => {
            let record = engine
                .run_single(&url, timeout.map(Duration::from_secs))
                .await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Batch {
            url,
            max_pages,
            timeout,
        } => {
            let records = engine
                .run_batch(
                    &url,
                    PageLimit::Bounded(max_pages),
                    timeout.map(Duration::from_secs),
                )
                .await?;
            tracing::info!("Crawled {} pages", records.len());
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Command::Stream {
            url,
            max_pages,
            unbounded,
            timeout,
        } => {
            let limit = if unbounded {
                PageLimit::Unbounded
            } else {
                PageLimit::Bounded(max_pages.unwrap_or(100))
            };

            let mut stream = engine.run_stream(&url, limit, timeout.map(Duration::from_secs))?;

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupt received, cancelling crawl");
                        stream.cancel();
                    }
                    event = stream.next() => {
                        match event {
                            Some(event) => println!("{}", serde_json::to_string(&event)?),
                            None => break,
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs are written to stderr so stdout carries only JSON output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("siphon=info,warn"),
            1 => EnvFilter::new("siphon=debug,info"),
            2 => EnvFilter::new("siphon=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
