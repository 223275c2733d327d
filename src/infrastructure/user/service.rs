//! User registration and lookup

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{validate_password, Email, User, UserStore};
use crate::domain::{DomainError, ValidationReason};
use crate::infrastructure::metrics::record_mutation;

/// User directory. Passwords are stored as given; hashing belongs to the
/// authenticator.
#[derive(Debug)]
pub struct UserDirectory<S: UserStore> {
    store: Arc<S>,
}

impl<S: UserStore> Clone for UserDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: UserStore> UserDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user under a unique email
    pub async fn register(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = Email::new(email)?;
        validate_password(password)?;

        if self.exists(&email).await? {
            return Err(DomainError::validation(ValidationReason::DuplicateEntry(
                "email",
            )));
        }

        let user = User::new(email, password);
        self.store.upsert_user(user.clone()).await?;

        info!(email = %user.email(), "User registered");
        record_mutation("user", "create");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &Email) -> Result<User, DomainError> {
        self.store.find_user_by_email(email).await
    }

    pub async fn exists(&self, email: &Email) -> Result<bool, DomainError> {
        match self.store.find_user_by_email(email).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn delete(&self, user: &User) -> Result<(), DomainError> {
        self.store.delete_user(user).await?;

        info!(email = %user.email(), "User deleted");
        record_mutation("user", "delete");
        Ok(())
    }
}
