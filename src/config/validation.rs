use crate::config::types::{Config, EngineConfig, FetcherConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_engine_config(&config.engine)?;
    validate_fetcher_config(&config.fetcher)?;
    Ok(())
}

/// Validates engine configuration
fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.default_timeout_secs < 1 || config.default_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "default_timeout_secs must be between 1 and 300, got {}",
            config.default_timeout_secs
        )));
    }

    if config.stream_buffer < 1 || config.stream_buffer > 1024 {
        return Err(ConfigError::Validation(format!(
            "stream_buffer must be between 1 and 1024, got {}",
            config.stream_buffer
        )));
    }

    if config.unbounded_time_ceiling_secs < 1 {
        return Err(ConfigError::Validation(
            "unbounded_time_ceiling_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.accept_language.is_empty() {
        return Err(ConfigError::Validation(
            "accept_language cannot be empty".to_string(),
        ));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}
