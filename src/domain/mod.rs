//! Domain layer - entities, invariants and the ports they are persisted and
//! published through

pub mod auth;
pub mod cache;
pub mod error;
pub mod registry;
pub mod service;
pub mod storage;
pub mod team;
pub mod token;
pub mod traits;
pub mod user;

pub use auth::Authenticator;
pub use cache::{Cache, CacheExt};
pub use error::{DomainError, ErrorKind, ForbiddenReason, ValidationReason};
pub use registry::CoordinationStore;
pub use service::{Aggregate, Service, ServiceSpec, ServiceStore, Subdomain};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Alias, MembershipChange, SkipReason, Team, TeamStore};
pub use token::{TokenInfo, TokenStore, TokenStoreExt};
pub use traits::DirectoryStore;
pub use user::{Email, User, UserStore};
