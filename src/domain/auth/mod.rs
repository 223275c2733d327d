//! Authentication capability
//!
//! Credential checking and token issuance live outside the directory; it
//! only consumes this interface.

use async_trait::async_trait;

use crate::domain::token::TokenInfo;
use crate::domain::user::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The user if the credentials are valid
    async fn authenticate(&self, email: &str, password: &str) -> Option<User>;

    async fn create_user_token(&self, user: &User) -> Result<TokenInfo, DomainError>;
}
