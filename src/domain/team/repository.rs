//! Team store trait

use async_trait::async_trait;

use super::entity::{Alias, Team};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Persistence capability for teams
#[async_trait]
pub trait TeamStore: Send + Sync + std::fmt::Debug {
    async fn upsert_team(&self, team: Team) -> Result<(), DomainError>;

    /// Fails with `NotFound` if no team has this alias
    async fn delete_team(&self, team: &Team) -> Result<(), DomainError>;

    /// Fails with `NotFound` if no team has this alias
    async fn find_team_by_alias(&self, alias: &Alias) -> Result<Team, DomainError>;

    /// Teams listing the user among their members
    async fn user_teams(&self, user: &User) -> Result<Vec<Team>, DomainError>;
}
