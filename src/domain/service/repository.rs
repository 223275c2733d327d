//! Service store trait

use async_trait::async_trait;

use super::aggregate::Aggregate;
use super::entity::{Service, Subdomain};
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::domain::DomainError;

/// Persistence capability for services
#[async_trait]
pub trait ServiceStore: Send + Sync + std::fmt::Debug {
    async fn upsert_service(&self, service: Service) -> Result<(), DomainError>;

    /// Fails with `NotFound` if no service has this subdomain
    async fn delete_service(&self, service: &Service) -> Result<(), DomainError>;

    /// Fails with `NotFound` if no service has this subdomain
    async fn find_service_by_subdomain(&self, subdomain: &Subdomain)
        -> Result<Service, DomainError>;

    /// Services owned by `team`
    async fn team_services(&self, team: &Team) -> Result<Vec<Service>, DomainError>;

    /// Services owned by any team the user belongs to.
    ///
    /// Never fails as a whole. A failed team lookup is reported in
    /// `failures` under the team alias, a failure to list the user's teams
    /// under the user's email.
    async fn user_services(&self, user: &User) -> Aggregate<Service>;
}
