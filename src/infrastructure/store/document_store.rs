//! Document-backed implementation of the directory storage port

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::service::{Aggregate, Service, ServiceStore, Subdomain};
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::team::{Alias, Team, TeamStore};
use crate::domain::token::{TokenInfo, TokenStore};
use crate::domain::user::{Email, User, UserStore};
use crate::domain::DomainError;

use crate::infrastructure::cache::InMemoryCache;
use crate::infrastructure::storage::InMemoryStorage;

fn not_found<E: StorageEntity>() -> DomainError {
    DomainError::not_found(format!("{} not found.", E::KIND))
}

/// Users, teams and services as whole documents keyed by their natural key,
/// tokens as expiring cache records.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    users: Arc<dyn Storage<User>>,
    teams: Arc<dyn Storage<Team>>,
    services: Arc<dyn Storage<Service>>,
    tokens: Arc<dyn Cache>,
}

impl DocumentStore {
    pub fn new(
        users: Arc<dyn Storage<User>>,
        teams: Arc<dyn Storage<Team>>,
        services: Arc<dyn Storage<Service>>,
        tokens: Arc<dyn Cache>,
    ) -> Self {
        Self {
            users,
            teams,
            services,
            tokens,
        }
    }

    /// Everything in memory
    pub fn in_memory() -> Self {
        Self::with_token_cache(Arc::new(InMemoryCache::new()))
    }

    /// In-memory documents with the given token cache
    pub fn with_token_cache(tokens: Arc<dyn Cache>) -> Self {
        Self::new(
            Arc::new(InMemoryStorage::<User>::new()),
            Arc::new(InMemoryStorage::<Team>::new()),
            Arc::new(InMemoryStorage::<Service>::new()),
            tokens,
        )
    }

    async fn find<E: StorageEntity + 'static>(
        storage: &dyn Storage<E>,
        key: &E::Key,
    ) -> Result<E, DomainError> {
        storage.get(key).await?.ok_or_else(not_found::<E>)
    }

    async fn remove<E: StorageEntity + 'static>(
        storage: &dyn Storage<E>,
        entity: &E,
    ) -> Result<(), DomainError> {
        if storage.delete(entity.key()).await? {
            Ok(())
        } else {
            Err(not_found::<E>())
        }
    }
}

#[async_trait]
impl UserStore for DocumentStore {
    async fn upsert_user(&self, user: User) -> Result<(), DomainError> {
        self.users.upsert(user).await?;
        Ok(())
    }

    async fn delete_user(&self, user: &User) -> Result<(), DomainError> {
        Self::remove(self.users.as_ref(), user).await
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<User, DomainError> {
        Self::find(self.users.as_ref(), email).await
    }
}

#[async_trait]
impl TeamStore for DocumentStore {
    async fn upsert_team(&self, team: Team) -> Result<(), DomainError> {
        self.teams.upsert(team).await?;
        Ok(())
    }

    async fn delete_team(&self, team: &Team) -> Result<(), DomainError> {
        Self::remove(self.teams.as_ref(), team).await
    }

    async fn find_team_by_alias(&self, alias: &Alias) -> Result<Team, DomainError> {
        Self::find(self.teams.as_ref(), alias).await
    }

    async fn user_teams(&self, user: &User) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.list().await?;

        Ok(teams
            .into_iter()
            .filter(|team| team.users().contains(user.email()))
            .collect())
    }
}

#[async_trait]
impl ServiceStore for DocumentStore {
    async fn upsert_service(&self, service: Service) -> Result<(), DomainError> {
        self.services.upsert(service).await?;
        Ok(())
    }

    async fn delete_service(&self, service: &Service) -> Result<(), DomainError> {
        Self::remove(self.services.as_ref(), service).await
    }

    async fn find_service_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Service, DomainError> {
        Self::find(self.services.as_ref(), subdomain).await
    }

    async fn team_services(&self, team: &Team) -> Result<Vec<Service>, DomainError> {
        let services = self.services.list().await?;

        Ok(services
            .into_iter()
            .filter(|service| service.team() == team.alias())
            .collect())
    }

    async fn user_services(&self, user: &User) -> Aggregate<Service> {
        let teams = match self.user_teams(user).await {
            Ok(teams) => teams,
            Err(e) => {
                warn!(user = %user.email(), error = %e, "Failed to list user teams");
                return Aggregate::failed(user.email().to_string(), e);
            }
        };

        let lookups = teams.iter().map(|team| self.team_services(team));
        let results = join_all(lookups).await;

        let mut aggregate = Aggregate::default();
        for (team, result) in teams.iter().zip(results) {
            match result {
                Ok(services) => aggregate.items.extend(services),
                Err(e) => {
                    warn!(team = %team.alias(), error = %e, "Failed to list team services");
                    aggregate.failures.push((team.alias().to_string(), e));
                }
            }
        }

        aggregate
    }
}

#[async_trait]
impl TokenStore for DocumentStore {
    async fn create_token(&self, token: &TokenInfo) -> Result<(), DomainError> {
        let ttl = token.ttl();

        self.tokens.set(&token.user_key(), token, ttl).await?;

        // Not rolled back if this second write fails
        if let Err(e) = self.tokens.set(&token.token, &token.user, ttl).await {
            warn!(
                user = %token.user.email(),
                error = %e,
                "Token record written without its reverse lookup"
            );
            return Err(e);
        }

        debug!(user = %token.user.email(), token_type = %token.token_type, "Token stored");
        Ok(())
    }

    async fn token_value(&self, key: &str) -> Result<String, DomainError> {
        self.tokens
            .get_raw(key)
            .await?
            .ok_or_else(|| DomainError::not_found("Token not found."))
    }

    async fn delete_token(&self, key: &str) -> Result<(), DomainError> {
        self.tokens.delete(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::token::TokenStoreExt;
    use std::time::Duration;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn user(s: &str) -> User {
        User::new(email(s), "secret")
    }

    fn service(subdomain: &str, team: &str, owner: &str) -> Service {
        Service::new(Subdomain::new(subdomain).unwrap(), Alias::new(team), email(owner))
    }

    #[tokio::test]
    async fn test_find_user_not_found() {
        let store = DocumentStore::in_memory();

        let result = store.find_user_by_email(&email("a@x.com")).await;
        assert_eq!(result, Err(DomainError::not_found("User not found.")));
    }

    #[tokio::test]
    async fn test_upsert_and_find_user() {
        let store = DocumentStore::in_memory();

        store.upsert_user(user("a@x.com")).await.unwrap();

        let found = store.find_user_by_email(&email("a@x.com")).await.unwrap();
        assert_eq!(found.email(), &email("a@x.com"));
        assert_eq!(found.password(), "secret");
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let store = DocumentStore::in_memory();

        let result = store.delete_user(&user("a@x.com")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_user_teams_filters_by_membership() {
        let store = DocumentStore::in_memory();
        let mut acme = Team::new("Acme", Alias::new("Acme"), email("a@x.com"));
        acme.push_user(email("b@x.com"));
        let other = Team::new("Other", Alias::new("Other"), email("c@x.com"));

        store.upsert_team(acme).await.unwrap();
        store.upsert_team(other).await.unwrap();

        let teams = store.user_teams(&user("b@x.com")).await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].alias().as_str(), "acme");

        assert!(store.user_teams(&user("z@x.com")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_team_and_user_services() {
        let store = DocumentStore::in_memory();
        let acme = Team::new("Acme", Alias::new("Acme"), email("a@x.com"));
        let other = Team::new("Other", Alias::new("Other"), email("c@x.com"));
        store.upsert_team(acme.clone()).await.unwrap();
        store.upsert_team(other).await.unwrap();

        store.upsert_service(service("backstage", "acme", "a@x.com")).await.unwrap();
        store.upsert_service(service("billing", "acme", "a@x.com")).await.unwrap();
        store.upsert_service(service("elsewhere", "other", "c@x.com")).await.unwrap();

        assert_eq!(store.team_services(&acme).await.unwrap().len(), 2);

        let aggregate = store.user_services(&user("a@x.com")).await;
        assert!(aggregate.is_complete());

        let mut mine: Vec<String> = aggregate
            .items
            .into_iter()
            .map(|s| s.subdomain().to_string())
            .collect();
        mine.sort();
        assert_eq!(mine, vec!["backstage", "billing"]);
    }

    #[tokio::test]
    async fn test_user_services_reports_unavailable_teams() {
        let store = DocumentStore::new(
            Arc::new(MockStorage::<User>::new()),
            Arc::new(MockStorage::<Team>::new().with_error("teams unavailable")),
            Arc::new(MockStorage::<Service>::new().with_entity(service("backstage", "acme", "a@x.com"))),
            Arc::new(MockCache::new()),
        );

        let aggregate = store.user_services(&user("a@x.com")).await;

        assert!(aggregate.items.is_empty());
        assert_eq!(
            aggregate.failures,
            vec![("a@x.com".to_string(), DomainError::storage("teams unavailable"))]
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_storage_error() {
        let store = DocumentStore::new(
            Arc::new(MockStorage::<User>::new().with_error("connection reset")),
            Arc::new(MockStorage::<Team>::new()),
            Arc::new(MockStorage::<Service>::new()),
            Arc::new(MockCache::new()),
        );

        let result = store.find_user_by_email(&email("a@x.com")).await;
        assert_eq!(result, Err(DomainError::storage("connection reset")));
    }

    #[tokio::test]
    async fn test_create_token_writes_both_records_with_same_ttl() {
        let cache = Arc::new(MockCache::new());
        let store = DocumentStore::with_token_cache(cache.clone());
        let token = TokenInfo::new("abc123", "Token", user("a@x.com"), 30);

        store.create_token(&token).await.unwrap();

        assert_eq!(cache.keys(), vec!["Token: a@x.com".to_string(), "abc123".to_string()]);
        assert_eq!(cache.ttl("Token: a@x.com").await.unwrap(), Some(Duration::from_secs(1800)));
        assert_eq!(cache.ttl("abc123").await.unwrap(), Some(Duration::from_secs(1800)));

        let info: TokenInfo = store.decode_token("Token: a@x.com").await.unwrap();
        assert_eq!(info.token, "abc123");

        let owner: User = store.decode_token("abc123").await.unwrap();
        assert_eq!(owner.email(), &email("a@x.com"));
    }

    #[tokio::test]
    async fn test_create_token_second_write_failure_leaves_first_record() {
        let cache = Arc::new(MockCache::new().failing_on("abc123"));
        let store = DocumentStore::with_token_cache(cache.clone());
        let token = TokenInfo::new("abc123", "Token", user("a@x.com"), 30);

        let result = store.create_token(&token).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert_eq!(cache.keys(), vec!["Token: a@x.com".to_string()]);
    }

    #[tokio::test]
    async fn test_token_value_missing_and_delete_idempotent() {
        let store = DocumentStore::in_memory();

        let result = store.token_value("nope").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        store.delete_token("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_token() {
        let store = DocumentStore::in_memory();
        let token = TokenInfo::new("abc123", "Token", user("a@x.com"), 30);
        store.create_token(&token).await.unwrap();

        store.delete_token("abc123").await.unwrap();

        assert!(store.token_value("abc123").await.is_err());
        assert!(store.token_value("Token: a@x.com").await.is_ok());
    }
}
