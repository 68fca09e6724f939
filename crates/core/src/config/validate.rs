use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Source section exists (enforced by serde)
/// - Source base URL is a non-empty http(s) URL
/// - Server port is not 0
/// - Refresh interval is at least one minute
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.source.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "source.base_url cannot be empty".to_string(),
        ));
    }

    if !config.source.base_url.starts_with("http://")
        && !config.source.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(
            "source.base_url must start with http:// or https://".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.cache.refresh_interval_minutes == 0 {
        return Err(ConfigError::ValidationError(
            "cache.refresh_interval_minutes must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, ServerConfig, SourceConfig};
    use std::net::IpAddr;

    fn valid_config() -> Config {
        Config {
            source: SourceConfig {
                base_url: "http://localhost:32400".to_string(),
                token: "secret".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server = ServerConfig {
            host: "0.0.0.0".parse::<IpAddr>().unwrap(),
            port: 0,
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_validate_empty_base_url_fails() {
        let mut config = valid_config();
        config.source.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_non_http_base_url_fails() {
        let mut config = valid_config();
        config.source.base_url = "ftp://localhost".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_refresh_interval_fails() {
        let mut config = valid_config();
        config.cache.refresh_interval_minutes = 0;
        assert!(validate_config(&config).is_err());
    }
}
