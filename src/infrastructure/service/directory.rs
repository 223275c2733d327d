//! Service directory: team-gated registration and publication

use std::sync::Arc;

use tracing::{info, warn};

use super::outcome::{Committed, PublicationStatus};
use crate::domain::service::{Aggregate, Service, ServiceStore, Subdomain, DEFAULT_TIMEOUT_MS};
use crate::domain::team::{Alias, Team, TeamStore};
use crate::domain::user::{Email, User, UserStore};
use crate::domain::{DomainError, ForbiddenReason, ValidationReason};
use crate::infrastructure::metrics::record_mutation;
use crate::infrastructure::publisher::Publisher;
use crate::infrastructure::team::TeamDirectory;

/// Request for registering or updating a service. The requesting user
/// becomes the owner.
#[derive(Debug, Clone)]
pub struct NewService {
    pub subdomain: Subdomain,
    /// Ignored on update, where the stored team is kept
    pub team: Alias,
    pub description: Option<String>,
    pub disabled: bool,
    pub timeout_ms: u64,
    pub endpoints: Vec<String>,
}

impl NewService {
    pub fn new(subdomain: Subdomain, team: Alias) -> Self {
        Self {
            subdomain,
            team,
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

    fn into_service(self, team: Alias, owner: Email) -> Service {
        let service = Service::new(self.subdomain, team, owner)
            .with_endpoints(self.endpoints)
            .with_timeout_ms(self.timeout_ms)
            .disabled(self.disabled);

        match self.description {
            Some(description) => service.with_description(description),
            None => service,
        }
    }
}

/// Service directory.
///
/// Writes are committed to storage first and announced afterwards. A failed
/// announcement does not undo the write; it is reported in the returned
/// [`Committed`]. Subdomain uniqueness is a probe followed by a write and is
/// not safe against concurrent registrations of the same subdomain.
#[derive(Debug)]
pub struct ServiceDirectory<S: ServiceStore + TeamStore + UserStore> {
    store: Arc<S>,
    teams: TeamDirectory<S>,
    publisher: Publisher,
}

impl<S: ServiceStore + TeamStore + UserStore> Clone for ServiceDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            teams: self.teams.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

impl<S: ServiceStore + TeamStore + UserStore> ServiceDirectory<S> {
    pub fn new(store: Arc<S>, publisher: Publisher) -> Self {
        Self {
            teams: TeamDirectory::new(Arc::clone(&store)),
            store,
            publisher,
        }
    }

    /// Register a service for a team the current user belongs to. The
    /// current user becomes the service owner.
    pub async fn save(
        &self,
        current_user: &User,
        request: NewService,
    ) -> Result<Committed<Service>, DomainError> {
        let team = self.teams.resolve(&request.team, current_user).await?;
        let service = request.into_service(team.alias().clone(), current_user.email().clone());
        service.validate()?;

        if self.exists(service.subdomain()).await? {
            return Err(DomainError::validation(ValidationReason::DuplicateEntry(
                "subdomain",
            )));
        }

        self.store.upsert_service(service.clone()).await?;

        info!(subdomain = %service.subdomain(), team = %team.alias(), owner = %service.owner(), "Service created");
        record_mutation("service", "create");

        Ok(self.announce(service).await)
    }

    /// Replace a service's attributes. Only its owner may do so; team and
    /// owner are kept from the stored record.
    pub async fn update(
        &self,
        current_user: &User,
        request: NewService,
    ) -> Result<Committed<Service>, DomainError> {
        let existing = self.owned(&request.subdomain, current_user).await?;
        let service = request.into_service(existing.team().clone(), existing.owner().clone());
        service.validate()?;

        self.store.upsert_service(service.clone()).await?;

        info!(subdomain = %service.subdomain(), "Service updated");
        record_mutation("service", "update");

        Ok(self.announce(service).await)
    }

    /// Delete a service owned by `requester` and withdraw it from the registry.
    ///
    /// A missing service and one owned by someone else are reported
    /// identically.
    pub async fn delete(
        &self,
        subdomain: &Subdomain,
        requester: &User,
    ) -> Result<Committed<Service>, DomainError> {
        let service = self.owned(subdomain, requester).await?;

        self.store.delete_service(&service).await?;

        info!(subdomain = %subdomain, "Service deleted");
        record_mutation("service", "delete");

        let result = self.publisher.retract(subdomain.as_str()).await;
        if let Err(e) = &result {
            warn!(subdomain = %subdomain, error = %e, "Service deleted but still published");
        }

        Ok(Committed {
            value: service,
            publication: PublicationStatus::from_result(result, PublicationStatus::Retracted),
        })
    }

    /// A service, as seen by a member of its team
    pub async fn info(&self, subdomain: &Subdomain, user: &User) -> Result<Service, DomainError> {
        let service = self.visible(subdomain).await?;
        self.teams.resolve(service.team(), user).await?;
        Ok(service)
    }

    pub async fn find_service_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Service, DomainError> {
        self.store.find_service_by_subdomain(subdomain).await
    }

    pub async fn team_services(&self, team: &Team) -> Result<Vec<Service>, DomainError> {
        self.store.team_services(team).await
    }

    /// Services of every team the user belongs to. Failed lookups are
    /// reported in `failures`, keyed by team alias, or by the user's email
    /// if their teams could not be listed.
    pub async fn user_services(&self, user: &User) -> Aggregate<Service> {
        self.store.user_services(user).await
    }

    async fn exists(&self, subdomain: &Subdomain) -> Result<bool, DomainError> {
        match self.store.find_service_by_subdomain(subdomain).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Lookup where absence is reported as `ServiceNotFound`
    async fn visible(&self, subdomain: &Subdomain) -> Result<Service, DomainError> {
        match self.store.find_service_by_subdomain(subdomain).await {
            Ok(service) => Ok(service),
            Err(e) if e.is_not_found() => {
                Err(DomainError::forbidden(ForbiddenReason::ServiceNotFound))
            }
            Err(e) => Err(e),
        }
    }

    async fn owned(&self, subdomain: &Subdomain, requester: &User) -> Result<Service, DomainError> {
        let service = self.visible(subdomain).await?;

        if !service.is_owned_by(requester.email()) {
            return Err(DomainError::forbidden(ForbiddenReason::ServiceNotFound));
        }

        Ok(service)
    }

    async fn announce(&self, service: Service) -> Committed<Service> {
        let result = self.publisher.publish(&service.spec()).await;
        if let Err(e) = &result {
            warn!(subdomain = %service.subdomain(), error = %e, "Service saved but not published");
        }

        Committed {
            value: service,
            publication: PublicationStatus::from_result(result, PublicationStatus::Published),
        }
    }
}
