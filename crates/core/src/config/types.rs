use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Media source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Media server base URL (e.g., "http://localhost:32400")
    pub base_url: String,
    /// Access token for the media server API
    pub token: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Cache behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// How often the background loop refreshes, and how old a snapshot may
    /// get before it counts as stale (default: 30)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_minutes: u64,
}

impl CacheConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_minutes * 60)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: default_refresh_interval(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub source: SanitizedSourceConfig,
    pub server: ServerConfig,
    pub cache: CacheConfig,
}

/// Sanitized source config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourceConfig {
    pub base_url: String,
    pub token_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            source: SanitizedSourceConfig {
                base_url: config.source.base_url.clone(),
                token_configured: !config.source.token.is_empty(),
                timeout_secs: config.source.timeout_secs,
            },
            server: config.server.clone(),
            cache: config.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_valid_config() {
        let toml = r#"
[source]
base_url = "http://localhost:32400"
token = "secret"

[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.source.base_url, "http://localhost:32400");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_with_default_server_and_cache() {
        let toml = r#"
[source]
base_url = "http://localhost:32400"
token = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.cache.refresh_interval_minutes, 30);
        assert_eq!(config.source.timeout_secs, 30);
    }

    #[test]
    fn test_deserialize_missing_source_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_interval_conversion() {
        let cache = CacheConfig {
            refresh_interval_minutes: 45,
        };
        assert_eq!(cache.refresh_interval(), Duration::from_secs(45 * 60));
    }

    #[test]
    fn test_sanitized_config_redacts_token() {
        let config = Config {
            source: SourceConfig {
                base_url: "http://localhost:32400".to_string(),
                token: "super-secret".to_string(),
                timeout_secs: 60,
            },
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.source.base_url, "http://localhost:32400");
        assert!(sanitized.source.token_configured);
        assert_eq!(sanitized.source.timeout_secs, 60);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
    }

    #[test]
    fn test_sanitized_config_empty_token() {
        let config = Config {
            source: SourceConfig {
                base_url: "http://localhost:32400".to_string(),
                token: String::new(),
                timeout_secs: 30,
            },
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
        };
        let sanitized = SanitizedConfig::from(&config);
        assert!(!sanitized.source.token_configured);
    }
}
