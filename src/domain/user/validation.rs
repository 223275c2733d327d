//! User validation utilities

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must contain a single '@' with text on both sides")]
    InvalidEmailFormat,

    #[error("Email cannot contain whitespace")]
    EmailWhitespace,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

const MAX_EMAIL_LENGTH: usize = 254;

/// Validate an email address
///
/// Only the shape needed for a lookup key is checked: a single `@` separating
/// a non-empty local part and domain, no whitespace.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::EmailWhitespace);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(UserValidationError::InvalidEmailFormat),
    }
}

/// Validate a password. Credential strength is the authenticator's concern.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}

impl From<UserValidationError> for DomainError {
    fn from(error: UserValidationError) -> Self {
        let field = match error {
            UserValidationError::EmptyPassword => "password",
            _ => "email",
        };
        DomainError::invalid_field(field, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@example.org").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@x.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long),
            Err(UserValidationError::EmailTooLong(254))
        );
    }

    #[test]
    fn test_invalid_email_format() {
        assert_eq!(
            validate_email("no-at-sign"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("@x.com"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("a@"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("a@b@c"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("a b@x.com"),
            Err(UserValidationError::EmailWhitespace)
        );
    }

    #[test]
    fn test_password() {
        assert!(validate_password("secret").is_ok());
        assert_eq!(validate_password(""), Err(UserValidationError::EmptyPassword));
    }

    #[test]
    fn test_into_domain_error() {
        let error: DomainError = UserValidationError::EmptyEmail.into();
        assert_eq!(
            error,
            DomainError::invalid_field("email", "Email cannot be empty")
        );
    }
}
