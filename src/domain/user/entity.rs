//! User entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_email, UserValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Email address - the unique identifier of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new Email after validation
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl PartialEq<str> for Email {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for Email {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered user.
///
/// Users are created by the signup flow and only referenced (by email) from
/// teams and services.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    email: Email,
    /// Opaque credential - never serialized
    #[serde(skip_serializing, default)]
    password: String,
}

impl User {
    pub fn new(email: Email, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Users are identified by email alone
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl StorageEntity for User {
    type Key = Email;

    const KIND: &'static str = "User";

    fn key(&self) -> &Self::Key {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = Email::new("alice@example.com").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
        assert_eq!(email.to_string(), "alice@example.com");
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("alice").is_err());
    }

    #[test]
    fn test_email_deserialize_rejects_invalid() {
        let result: Result<Email, _> = serde_json::from_str("\"not-an-email\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User::new(Email::new("a@x.com").unwrap(), "hunter2");
        let json = serde_json::to_string(&user).unwrap();

        assert_eq!(json, r#"{"email":"a@x.com"}"#);
        assert!(!format!("{:?}", user).contains("hunter2"));
    }

    #[test]
    fn test_user_deserializes_without_password() {
        let user: User = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(user.email().as_str(), "a@x.com");
        assert_eq!(user.password(), "");
    }
}
