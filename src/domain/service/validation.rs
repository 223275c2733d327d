//! Service validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::DomainError;

/// Maximum length of a DNS label
pub const MAX_SUBDOMAIN_LENGTH: usize = 63;

/// Lowercase alphanumerics and hyphens, no edge hyphens
static SUBDOMAIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap());

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceValidationError {
    #[error("Subdomain cannot be empty")]
    EmptySubdomain,

    #[error("Subdomain cannot exceed {0} characters")]
    SubdomainTooLong(usize),

    #[error("Subdomain '{0}' must be lowercase alphanumerics and hyphens, and cannot start or end with a hyphen")]
    InvalidSubdomainFormat(String),

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Validate a subdomain
pub fn validate_subdomain(subdomain: &str) -> Result<(), ServiceValidationError> {
    if subdomain.is_empty() {
        return Err(ServiceValidationError::EmptySubdomain);
    }

    if subdomain.len() > MAX_SUBDOMAIN_LENGTH {
        return Err(ServiceValidationError::SubdomainTooLong(MAX_SUBDOMAIN_LENGTH));
    }

    if !SUBDOMAIN_PATTERN.is_match(subdomain) {
        return Err(ServiceValidationError::InvalidSubdomainFormat(
            subdomain.to_string(),
        ));
    }

    Ok(())
}

/// Validate the routing attributes of a service
pub fn validate_endpoints(endpoints: &[String]) -> Result<(), ServiceValidationError> {
    if endpoints.iter().any(|e| e.trim().is_empty()) {
        return Err(ServiceValidationError::EmptyEndpoint);
    }
    Ok(())
}

impl From<ServiceValidationError> for DomainError {
    fn from(error: ServiceValidationError) -> Self {
        let field = match error {
            ServiceValidationError::ZeroTimeout => "timeout",
            ServiceValidationError::EmptyEndpoint => "endpoints",
            _ => "subdomain",
        };
        DomainError::invalid_field(field, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_subdomains() {
        assert!(validate_subdomain("backstage").is_ok());
        assert!(validate_subdomain("api-v2").is_ok());
        assert!(validate_subdomain("a").is_ok());
    }

    #[test]
    fn test_empty_subdomain() {
        assert_eq!(
            validate_subdomain(""),
            Err(ServiceValidationError::EmptySubdomain)
        );
    }

    #[test]
    fn test_subdomain_too_long() {
        assert_eq!(
            validate_subdomain(&"a".repeat(64)),
            Err(ServiceValidationError::SubdomainTooLong(63))
        );
    }

    #[test]
    fn test_invalid_subdomain_format() {
        for input in ["-api", "api-", "Api", "api.v2", "api_v2"] {
            assert!(
                matches!(
                    validate_subdomain(input),
                    Err(ServiceValidationError::InvalidSubdomainFormat(_))
                ),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_endpoints() {
        assert!(validate_endpoints(&[]).is_ok());
        assert!(validate_endpoints(&["http://10.0.0.1:8080".to_string()]).is_ok());
        assert_eq!(
            validate_endpoints(&[" ".to_string()]),
            Err(ServiceValidationError::EmptyEndpoint)
        );
    }
}
