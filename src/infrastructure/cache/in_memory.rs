//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Upper bound on any entry's lifetime, regardless of its own TTL
    pub max_ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            max_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_max_ttl(mut self, ttl: Duration) -> Self {
        self.max_ttl = ttl;
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    /// Millis since epoch
    expires_at: u64,
}

/// Thread-safe in-memory cache backed by moka.
///
/// Each entry carries its own expiry; moka's global TTL only bounds how long
/// an expired entry can linger before eviction.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.max_ttl)
            .build();

        Self { cache }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.cache.get(key).await?;

        if Self::current_time_millis() >= entry.expires_at {
            self.cache.remove(key).await;
            return None;
        }

        Some(entry)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.live_entry(key).await.map(|entry| entry.data))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let entry = CacheEntry {
            data: value.to_string(),
            expires_at: Self::current_time_millis() + ttl.as_millis() as u64,
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        Ok(self.live_entry(key).await.map(|entry| {
            Duration::from_millis(entry.expires_at.saturating_sub(Self::current_time_millis()))
        }))
    }
}
