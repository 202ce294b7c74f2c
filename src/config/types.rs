use serde::Deserialize;

/// Main configuration structure for Siphon
///
/// All sections are optional in the TOML file; anything omitted falls back
/// to the defaults below, so the engine also runs with no config file at
/// all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub fetcher: FetcherConfig,
    pub normalizer: NormalizerConfig,
}

/// Crawl engine behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default per-request timeout when the caller does not supply one
    /// (seconds)
    #[serde(rename = "default-timeout-secs")]
    pub default_timeout_secs: u64,

    /// Capacity of the bounded event channel used in streaming mode; the
    /// producer suspends when the consumer falls this far behind
    #[serde(rename = "stream-buffer")]
    pub stream_buffer: usize,

    /// Wall-clock ceiling for unbounded crawls (seconds); bounded crawls
    /// are limited by their page budget instead
    #[serde(rename = "unbounded-time-ceiling-secs")]
    pub unbounded_time_ceiling_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: 10,
            stream_buffer: 16,
            unbounded_time_ceiling_secs: 300,
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Maximum number of redirects to follow per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            max_redirects: 10,
        }
    }
}

/// URL normalizer configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tracking query parameters to strip in addition to the built-in set
    #[serde(rename = "extra-tracking-params")]
    pub extra_tracking_params: Vec<String>,
}
