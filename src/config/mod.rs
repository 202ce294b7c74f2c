//! Configuration module for Siphon
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so a config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use siphon::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("siphon.toml")).unwrap();
//! println!("Unbounded ceiling: {}s", config.engine.unbounded_time_ceiling_secs);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, EngineConfig, FetcherConfig, NormalizerConfig};
