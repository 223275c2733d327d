//! User store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Email, User};
use crate::domain::DomainError;

/// Persistence capability for users
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    async fn upsert_user(&self, user: User) -> Result<(), DomainError>;

    /// Fails with `NotFound` if no user has this email
    async fn delete_user(&self, user: &User) -> Result<(), DomainError>;

    /// Fails with `NotFound` if no user has this email
    async fn find_user_by_email(&self, email: &Email) -> Result<User, DomainError>;
}
