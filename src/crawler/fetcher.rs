//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawl engine:
//! - Building a per-job HTTP client with a browser-like header set
//! - GET requests with per-request timeouts
//! - Error classification into the per-page failure taxonomy
//!
//! The client's connection pool is owned by exactly one crawl job and is
//! released when the job's loop exits.

use crate::config::FetcherConfig;
use reqwest::{header, redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Per-page fetch failures; all recoverable at the job level
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Unsupported content type '{content_type}' for {url}")]
    UnsupportedContent { url: String, content_type: String },
}

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct FetchedPage {
    /// HTTP status code of the final response
    pub status_code: u16,

    /// Raw HTML body
    pub body: String,
}

/// Builds the HTTP client for one crawl job
///
/// The header set mimics a desktop browser (the configured user agent plus
/// Accept and Accept-Language), which keeps servers that reject obvious
/// bots from skewing results. The timeout applies per request.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
/// * `timeout` - Per-request timeout for every request this client makes
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use siphon::config::FetcherConfig;
/// use siphon::crawler::build_http_client;
///
/// let config = FetcherConfig::default();
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &FetcherConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    if let Ok(value) = header::HeaderValue::from_str(&config.accept_language) {
        headers.insert(header::ACCEPT_LANGUAGE, value);
    }

    Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single page over HTTP GET
///
/// # Errors
///
/// * [`FetchError::Timeout`] - no response within the client's timeout
/// * [`FetchError::Http`] - non-2xx status
/// * [`FetchError::Network`] - connection or transport failure
/// * [`FetchError::UnsupportedContent`] - 2xx response that is not HTML
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !content_type.contains("text/html") {
        return Err(FetchError::UnsupportedContent {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        status_code: status.as_u16(),
        body,
    })
}

/// Classifies a reqwest transport error into the fetch taxonomy
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "connection failed".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetcherConfig::default();
        let client = build_http_client(&config, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_client_with_custom_agent() {
        let config = FetcherConfig {
            user_agent: "TestAgent/1.0".to_string(),
            ..FetcherConfig::default()
        };
        assert!(build_http_client(&config, Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_error_display_includes_url() {
        let err = FetchError::Http {
            url: "https://example.com/x".to_string(),
            status: 503,
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("https://example.com/x"));
    }

    // Fetch behavior against live responses is covered by the wiremock
    // tests in tests/.
}
