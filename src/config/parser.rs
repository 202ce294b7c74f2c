use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the
///   configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use siphon::config::load_config;
///
/// let config = load_config(Path::new("siphon.toml")).unwrap();
/// println!("Stream buffer: {}", config.engine.stream_buffer);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[engine]
default-timeout-secs = 15
stream-buffer = 8
unbounded-time-ceiling-secs = 120

[fetcher]
user-agent = "TestAgent/1.0"
accept-language = "en"
max-redirects = 5

[normalizer]
extra-tracking-params = ["sessionid"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.engine.default_timeout_secs, 15);
        assert_eq!(config.engine.stream_buffer, 8);
        assert_eq!(config.fetcher.user_agent, "TestAgent/1.0");
        assert_eq!(config.normalizer.extra_tracking_params, vec!["sessionid"]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config_content = r#"
[engine]
stream-buffer = 4
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.engine.stream_buffer, 4);
        assert_eq!(config.engine.default_timeout_secs, 10);
        assert_eq!(config.engine.unbounded_time_ceiling_secs, 300);
        assert!(config.fetcher.user_agent.contains("Mozilla"));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.engine.stream_buffer, 16);
        assert!(config.normalizer.extra_tracking_params.is_empty());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/siphon.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[engine]
stream-buffer = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
