//! Siphon: a web crawling and article-extraction engine
//!
//! This crate implements a crawl engine that, starting from a seed URL,
//! fetches pages, extracts readable article content, follows same-domain
//! links, and delivers the resulting page records either as a batch or as a
//! live event stream with backpressure and cooperative cancellation.

pub mod config;
pub mod crawler;
pub mod record;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Siphon operations
#[derive(Debug, Error)]
pub enum SiphonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    Seed(#[from] UrlError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("Crawl cancelled")]
    Cancelled,

    #[error("Crawl failed: {0}")]
    Job(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Siphon operations
pub type Result<T> = std::result::Result<T, SiphonError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEvent, CrawlJob, CrawlMode, CrawlStream, Engine, PageLimit};
pub use record::PageRecord;
pub use state::{JobState, Progress};
pub use url::{normalize_url, ScopeDomain};
