//! Service entity and publication descriptor

use serde::{Deserialize, Serialize};

use super::validation::{validate_endpoints, validate_subdomain, ServiceValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::Alias;
use crate::domain::user::Email;

/// Default upstream timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Service subdomain - the service's unique key and publication handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subdomain(String);

impl Subdomain {
    pub fn new(subdomain: impl Into<String>) -> Result<Self, ServiceValidationError> {
        let subdomain = subdomain.into();
        validate_subdomain(&subdomain)?;
        Ok(Self(subdomain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Subdomain {
    type Error = ServiceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subdomain> for String {
    fn from(subdomain: Subdomain) -> Self {
        subdomain.0
    }
}

impl std::fmt::Display for Subdomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for Subdomain {
    fn as_str(&self) -> &str {
        &self.0
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// A service registered under a subdomain by a member of its team.
///
/// `team` is the owning team's alias, not a live handle. `owner` is the
/// member who registered the service, which need not be the team owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    subdomain: Subdomain,
    team: Alias,
    owner: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    disabled: bool,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default)]
    endpoints: Vec<String>,
}

impl Service {
    pub fn new(subdomain: Subdomain, team: Alias, owner: Email) -> Self {
        Self {
            subdomain,
            team,
            owner,
            description: None,
            disabled: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            endpoints: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Getters

    pub fn subdomain(&self) -> &Subdomain {
        &self.subdomain
    }

    pub fn team(&self) -> &Alias {
        &self.team
    }

    pub fn owner(&self) -> &Email {
        &self.owner
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn is_owned_by(&self, email: &Email) -> bool {
        &self.owner == email
    }

    /// Checks the attributes that the key newtypes cannot
    pub fn validate(&self) -> Result<(), ServiceValidationError> {
        if self.timeout_ms == 0 {
            return Err(ServiceValidationError::ZeroTimeout);
        }
        validate_endpoints(&self.endpoints)
    }

    /// Descriptor announced to the discovery registry
    pub fn spec(&self) -> ServiceSpec {
        ServiceSpec {
            handle: self.subdomain.as_str().to_string(),
            team: self.team.as_str().to_string(),
            disabled: self.disabled,
            timeout_ms: self.timeout_ms,
            backends: self
                .endpoints
                .iter()
                .map(|address| Backend {
                    address: address.clone(),
                })
                .collect(),
        }
    }
}

impl StorageEntity for Service {
    type Key = Subdomain;

    const KIND: &'static str = "Service";

    fn key(&self) -> &Self::Key {
        &self.subdomain
    }
}

/// Upstream address a router forwards to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    pub address: String,
}

/// Publication descriptor, keyed in the registry by `handle`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub handle: String,
    pub team: String,
    pub disabled: bool,
    pub timeout_ms: u64,
    pub backends: Vec<Backend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Service {
        Service::new(
            Subdomain::new("backstage").unwrap(),
            Alias::new("Acme"),
            Email::new("b@x.com").unwrap(),
        )
    }

    #[test]
    fn test_subdomain() {
        assert_eq!(Subdomain::new("backstage").unwrap().as_str(), "backstage");
        assert!(Subdomain::new("Back Stage").is_err());
    }

    #[test]
    fn test_service_defaults() {
        let service = service();

        assert_eq!(service.timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert!(!service.is_disabled());
        assert!(service.endpoints().is_empty());
        assert!(service.description().is_none());
        assert!(service.is_owned_by(&Email::new("b@x.com").unwrap()));
        assert!(!service.is_owned_by(&Email::new("a@x.com").unwrap()));
    }

    #[test]
    fn test_service_deserialize_defaults() {
        let service: Service = serde_json::from_str(
            r#"{"subdomain":"backstage","team":"Acme","owner":"b@x.com"}"#,
        )
        .unwrap();

        assert_eq!(service.team().as_str(), "acme");
        assert_eq!(service.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_service_deserialize_rejects_bad_subdomain() {
        let result: Result<Service, _> = serde_json::from_str(
            r#"{"subdomain":"-bad-","team":"acme","owner":"b@x.com"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(service().validate().is_ok());
        assert_eq!(
            service().with_timeout_ms(0).validate(),
            Err(ServiceValidationError::ZeroTimeout)
        );
    }

    #[test]
    fn test_spec_uses_subdomain_as_handle() {
        let spec = service()
            .with_endpoints(vec!["http://10.0.0.1:8080".to_string()])
            .with_timeout_ms(500)
            .spec();

        assert_eq!(spec.handle, "backstage");
        assert_eq!(spec.team, "acme");
        assert_eq!(spec.timeout_ms, 500);
        assert_eq!(
            spec.backends,
            vec![Backend {
                address: "http://10.0.0.1:8080".to_string()
            }]
        );
    }
}
