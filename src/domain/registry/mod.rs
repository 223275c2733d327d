//! Coordination store port
//!
//! The discovery registry routers and gateways watch for service
//! descriptors. Assumed linearizable per key, with no transactions across
//! keys.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CoordinationStore: Send + Sync + std::fmt::Debug {
    /// Stores `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError>;

    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError>;

    /// Removes `key`; removing an absent key succeeds
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
