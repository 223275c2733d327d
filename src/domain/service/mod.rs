//! Service domain module

mod aggregate;
mod entity;
mod repository;
mod validation;

pub use aggregate::Aggregate;
pub use entity::{Backend, Service, ServiceSpec, Subdomain, DEFAULT_TIMEOUT_MS};
pub use repository::ServiceStore;
pub use validation::{
    validate_endpoints, validate_subdomain, ServiceValidationError, MAX_SUBDOMAIN_LENGTH,
};
