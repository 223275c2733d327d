//! In-process coordination store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::registry::CoordinationStore;
use crate::domain::DomainError;

/// Coordination store kept in a process-local map, for tests and single-node setups
#[derive(Debug, Default)]
pub struct InMemoryCoordinationStore {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryCoordinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently present, sorted
    pub fn keys(&self) -> Result<Vec<String>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::publication(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl CoordinationStore for InMemoryCoordinationStore {
    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::publication(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::publication(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::publication(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let store = InMemoryCoordinationStore::new();

        store.put("backstage", Bytes::from_static(b"one")).await.unwrap();
        store.put("backstage", Bytes::from_static(b"two")).await.unwrap();

        assert_eq!(
            store.get("backstage").await.unwrap(),
            Some(Bytes::from_static(b"two"))
        );
        assert_eq!(store.keys().unwrap(), vec!["backstage".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_absent_key() {
        let store = InMemoryCoordinationStore::new();

        store.delete("nope").await.unwrap();
        assert!(store.get("nope").await.unwrap().is_none());
    }
}
