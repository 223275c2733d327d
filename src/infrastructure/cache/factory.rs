//! Token cache selection from configuration

use std::sync::Arc;

use anyhow::Context;

use crate::config::{TokenBackend, TokensConfig};
use crate::domain::cache::Cache;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

/// Builds the cache backing the token store
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, config: &TokensConfig) -> anyhow::Result<Arc<dyn Cache>> {
        match config.backend {
            TokenBackend::Memory => {
                let cache = InMemoryCache::with_config(
                    InMemoryCacheConfig::default().with_max_capacity(config.max_capacity),
                );
                Ok(Arc::new(cache))
            }
            TokenBackend::Redis => {
                let url = config
                    .redis_url
                    .clone()
                    .context("tokens.redis_url is required for the redis token backend")?;

                let mut redis_config = RedisCacheConfig::new(url);

                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                let cache = RedisCache::new(redis_config).await?;
                Ok(Arc::new(cache))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let cache = CacheFactory::new()
            .create(&TokensConfig::default())
            .await
            .unwrap();

        cache
            .set("test", &"value", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("test").await.unwrap();
        assert_eq!(result, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_factory_create_redis_missing_url() {
        let config = TokensConfig {
            backend: TokenBackend::Redis,
            redis_url: None,
            ..Default::default()
        };

        let result = CacheFactory::new().create(&config).await;
        assert!(result.is_err());
    }
}
