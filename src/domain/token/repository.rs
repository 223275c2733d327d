//! Token store trait

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::entity::TokenInfo;
use crate::domain::DomainError;

/// Persistence capability for tokens.
///
/// `create_token` writes two independently expiring records with the same
/// TTL: the token info under [`TokenInfo::user_key`] and the user under the
/// raw token string. The writes are not atomic. If the first succeeds and
/// the second fails the error is returned and the first record stays until
/// it expires.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    async fn create_token(&self, token: &TokenInfo) -> Result<(), DomainError>;

    /// Raw JSON stored under `key`. Fails with `NotFound` if absent or expired
    async fn token_value(&self, key: &str) -> Result<String, DomainError>;

    /// Deleting an absent key is not an error
    async fn delete_token(&self, key: &str) -> Result<(), DomainError>;
}

/// Typed decoding on top of [`TokenStore`]
pub trait TokenStoreExt: TokenStore {
    /// Decodes the record under `key`: a `TokenInfo` for user keys, a `User`
    /// for raw token keys
    fn decode_token<'a, T>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<T, DomainError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let raw = self.token_value(key).await?;
            serde_json::from_str(&raw)
                .map_err(|e| DomainError::storage(format!("Failed to decode token record: {}", e)))
        }
    }
}

impl<T: TokenStore + ?Sized> TokenStoreExt for T {}
