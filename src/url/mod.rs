//! URL handling module for Siphon
//!
//! This module provides URL normalization (canonical, deduplication-safe
//! forms) and the scope-domain check that confines a crawl to the seed
//! URL's host.

mod normalize;
mod scope;

pub use normalize::normalize_url;
pub use scope::ScopeDomain;
