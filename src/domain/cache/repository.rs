//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Key/value cache where every record carries its own TTL.
///
/// Values are JSON strings so the trait stays dyn-compatible; use
/// [`CacheExt`] for typed access.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw JSON value, `None` if absent or expired
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw JSON value with a TTL
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Deletes a value, returns true if it was present
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Remaining TTL for a key, `None` if absent
    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError>;
}

/// Typed get/set on top of [`Cache`]
pub trait CacheExt: Cache {
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::storage(format!("Failed to deserialize cached value: {}", e))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::storage(format!("Failed to serialize cached value: {}", e))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }
}

impl<T: Cache + ?Sized> CacheExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache for testing, records TTLs and can fail selected writes
    #[derive(Debug, Default)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, (String, Duration)>>,
        error: Mutex<Option<String>>,
        failing_key: Mutex<Option<String>>,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Fails `set_raw` for this key only
        pub fn failing_on(self, key: impl Into<String>) -> Self {
            *self.failing_key.lock().unwrap() = Some(key.into());
            self
        }

        pub fn keys(&self) -> Vec<String> {
            let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
            self.check_error()?;
            Ok(self.entries.lock().unwrap().get(key).map(|(json, _)| json.clone()))
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
            self.check_error()?;
            if self.failing_key.lock().unwrap().as_deref() == Some(key) {
                return Err(DomainError::storage(format!("write to '{}' refused", key)));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), ttl));
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
            self.check_error()?;
            Ok(self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_cache_set_get() {
            let cache = MockCache::new();
            cache
                .set("key1", &"value1", Duration::from_secs(60))
                .await
                .unwrap();

            let result: Option<String> = cache.get("key1").await.unwrap();
            assert_eq!(result, Some("value1".to_string()));
            assert_eq!(
                cache.ttl("key1").await.unwrap(),
                Some(Duration::from_secs(60))
            );
        }

        #[tokio::test]
        async fn test_mock_cache_failing_key() {
            let cache = MockCache::new().failing_on("bad");

            assert!(cache.set("good", &1, Duration::from_secs(1)).await.is_ok());
            assert!(cache.set("bad", &1, Duration::from_secs(1)).await.is_err());
            assert_eq!(cache.keys(), vec!["good".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_cache_with_error() {
            let cache = MockCache::new().with_error("down");
            assert!(cache.get_raw("key").await.is_err());
        }
    }
}
