//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Document storage for one entity type.
///
/// Writes are whole-document upserts keyed by the entity's natural key with
/// per-key last-write-wins semantics. There is no check-and-set: callers
/// that probe with [`Storage::exists`] before writing race with concurrent
/// writers of the same key.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts or replaces the document stored under the entity's key
    async fn upsert(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its key, returns true if it was present
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
