//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawl machinery:
//! - HTTP fetching with browser-like headers and error classification
//! - HTML content and link extraction
//! - Frontier management (dedup, scope, FIFO traversal, budget cap)
//! - The crawl engine that orchestrates them, in batch or streaming mode

mod engine;
mod events;
mod extractor;
mod fetcher;
mod frontier;

pub use engine::{CrawlJob, CrawlMode, CrawlStream, Engine};
pub use events::CrawlEvent;
pub use extractor::{extract, ExtractedContent};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use frontier::{Frontier, PageLimit};
