use std::time::Duration;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tokens: TokensConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where login tokens are kept
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    pub backend: TokenBackend,
    /// Required for the redis backend
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    /// Entry cap for the memory backend
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    Memory,
    Redis,
}

/// Coordination store that service descriptors are published to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub backend: RegistryBackend,
    /// Consul agent address
    pub address: String,
    /// Consul ACL token
    pub token: Option<String>,
    pub key_prefix: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    #[default]
    Memory,
    Consul,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            backend: TokenBackend::default(),
            redis_url: None,
            key_prefix: Some("apihub".to_string()),
            max_capacity: 100_000,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: RegistryBackend::default(),
            address: "http://127.0.0.1:8500".to_string(),
            token: None,
            key_prefix: String::new(),
            timeout_secs: 5,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Layers `config/default`, `config/local` and `APIHUB__*` environment
    /// variables, after loading `.env` if present.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APIHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.tokens.backend, TokenBackend::Memory);
        assert_eq!(config.registry.backend, RegistryBackend::Memory);
        assert_eq!(config.registry.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [registry]
                backend = "consul"
                address = "http://consul:8500"
                key_prefix = "apihub/services/"

                [tokens]
                backend = "redis"
                redis_url = "redis://cache:6379"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.registry.backend, RegistryBackend::Consul);
        assert_eq!(config.registry.key_prefix, "apihub/services/");
        assert_eq!(config.registry.timeout_secs, 5);
        assert_eq!(config.tokens.backend, TokenBackend::Redis);
        assert_eq!(config.tokens.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.tokens.max_capacity, 100_000);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
