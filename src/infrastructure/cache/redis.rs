//! Redis cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key_prefix: None,
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Redis cache; every write is a `SET ... EX` so expiry is enforced by Redis
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::storage(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    fn prefix_key(&self, key: &str) -> String {
        prefixed(self.config.key_prefix.as_deref(), key)
    }
}

fn prefixed(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

/// Redis expiries have second granularity; never round down to "no expiry"
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection.clone();

        conn.get(self.prefix_key(key))
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get key '{}': {}", key, e)))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: () = conn
            .set_ex(self.prefix_key(key), value, ttl_secs(ttl))
            .await
            .map_err(|e| DomainError::storage(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let deleted: i32 = conn.del(self.prefix_key(key)).await.map_err(|e| {
            DomainError::storage(format!("Failed to delete key '{}': {}", key, e))
        })?;

        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        conn.exists(self.prefix_key(key)).await.map_err(|e| {
            DomainError::storage(format!("Failed to check existence of key '{}': {}", key, e))
        })
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        let mut conn = self.connection.clone();

        let ttl_secs: i64 = conn.ttl(self.prefix_key(key)).await.map_err(|e| {
            DomainError::storage(format!("Failed to get TTL for key '{}': {}", key, e))
        })?;

        // -2: no such key, -1: no expiry
        if ttl_secs < 0 {
            Ok(None)
        } else {
            Ok(Some(Duration::from_secs(ttl_secs as u64)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[test]
    fn test_prefixed_keys() {
        assert_eq!(prefixed(Some("apihub"), "Token: a@x.com"), "apihub:Token: a@x.com");
        assert_eq!(prefixed(None, "abc"), "abc");
    }

    #[test]
    fn test_ttl_never_rounds_to_zero() {
        assert_eq!(ttl_secs(Duration::from_millis(10)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(1800)), 1800);
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_get_and_ttl() {
        let cache = RedisCache::new(RedisCacheConfig::new("redis://127.0.0.1:6379").with_key_prefix("test"))
            .await
            .unwrap();

        cache
            .set("key1", &"value1", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
        assert!(cache.ttl("key1").await.unwrap().is_some());

        assert!(cache.delete("key1").await.unwrap());
    }
}
