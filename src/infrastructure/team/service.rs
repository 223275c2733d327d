//! Team directory: creation, ownership checks and membership changes

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{
    validate_team_name, Alias, MembershipChange, SkipReason, Team, TeamStore, TeamValidationError,
};
use crate::domain::user::{Email, User, UserStore};
use crate::domain::{DomainError, ForbiddenReason, ValidationReason};
use crate::infrastructure::metrics::record_mutation;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    /// Defaults to the name; slugified either way
    pub alias: Option<String>,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Team directory.
///
/// Alias uniqueness is a probe followed by a write, so two concurrent
/// creates of the same alias can both succeed; the later write wins.
#[derive(Debug)]
pub struct TeamDirectory<S: TeamStore + UserStore> {
    store: Arc<S>,
}

impl<S: TeamStore + UserStore> Clone for TeamDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TeamStore + UserStore> TeamDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a team owned by `owner`, who becomes its only member
    pub async fn create(&self, request: NewTeam, owner: &User) -> Result<Team, DomainError> {
        validate_team_name(&request.name)?;

        let alias = Alias::new(request.alias.as_deref().unwrap_or(&request.name));
        if alias.is_empty() {
            return Err(TeamValidationError::EmptyAlias.into());
        }

        if self.exists(&alias).await? {
            return Err(DomainError::validation(ValidationReason::DuplicateEntry(
                "alias",
            )));
        }

        let team = Team::new(request.name, alias, owner.email().clone());
        self.store.upsert_team(team.clone()).await?;

        info!(alias = %team.alias(), owner = %team.owner(), "Team created");
        record_mutation("team", "create");
        Ok(team)
    }

    /// Persist changes to an existing team. The alias is the key and is not
    /// re-checked for uniqueness.
    pub async fn update(&self, team: Team) -> Result<Team, DomainError> {
        validate_team_name(team.name())?;

        self.store.upsert_team(team.clone()).await?;

        info!(alias = %team.alias(), "Team updated");
        record_mutation("team", "update");
        Ok(team)
    }

    /// Delete a team; only its owner may do so
    pub async fn delete(&self, team: &Team, requester: &User) -> Result<(), DomainError> {
        if !team.is_owner(requester.email()) {
            return Err(DomainError::forbidden(
                ForbiddenReason::OnlyOwnerHasPermission,
            ));
        }

        self.store.delete_team(team).await?;

        info!(alias = %team.alias(), "Team deleted");
        record_mutation("team", "delete");
        Ok(())
    }

    /// Add registered users to the team.
    ///
    /// Unparseable emails, unknown users and existing members are skipped.
    /// The team is written once, and only if someone was added. `team` is
    /// left untouched when the write fails.
    pub async fn add_users(
        &self,
        team: &mut Team,
        emails: &[String],
    ) -> Result<MembershipChange, DomainError> {
        let mut updated = team.clone();
        let mut change = MembershipChange::default();

        for candidate in emails {
            let Ok(email) = Email::new(candidate.as_str()) else {
                change.skip(candidate.as_str(), SkipReason::InvalidEmail);
                continue;
            };

            if !self.user_exists(&email).await? {
                debug!(email = %email, "Skipping unknown user");
                change.skip(candidate.as_str(), SkipReason::UnknownUser);
                continue;
            }

            if updated.contains_user(&email).is_ok() {
                change.skip(candidate.as_str(), SkipReason::AlreadyMember);
                continue;
            }

            updated.push_user(email.clone());
            change.apply(email);
        }

        if !change.is_empty() {
            self.store.upsert_team(updated.clone()).await?;
            *team = updated;

            info!(alias = %team.alias(), added = change.applied.len(), "Users added to team");
            record_mutation("team", "add_users");
        }

        Ok(change)
    }

    /// Remove members from the team.
    ///
    /// The owner is never removed. If nothing else was removed and the owner
    /// was among the candidates, the call fails with `RemoveOwnerFromTeam`.
    /// `team` is left untouched when the write fails.
    pub async fn remove_users(
        &self,
        team: &mut Team,
        emails: &[String],
    ) -> Result<MembershipChange, DomainError> {
        let mut updated = team.clone();
        let mut change = MembershipChange::default();
        let mut owner_requested = false;

        for candidate in emails {
            let Ok(email) = Email::new(candidate.as_str()) else {
                change.skip(candidate.as_str(), SkipReason::InvalidEmail);
                continue;
            };

            if updated.is_owner(&email) {
                owner_requested = true;
                change.skip(candidate.as_str(), SkipReason::Owner);
                continue;
            }

            if !self.user_exists(&email).await? {
                debug!(email = %email, "Skipping unknown user");
                change.skip(candidate.as_str(), SkipReason::UnknownUser);
                continue;
            }

            match updated.contains_user(&email) {
                Ok(index) => {
                    let removed = updated.swap_remove_user(index);
                    change.apply(removed);
                }
                Err(_) => change.skip(candidate.as_str(), SkipReason::NotMember),
            }
        }

        if !change.is_empty() {
            self.store.upsert_team(updated.clone()).await?;
            *team = updated;

            info!(alias = %team.alias(), removed = change.applied.len(), "Users removed from team");
            record_mutation("team", "remove_users");
            return Ok(change);
        }

        if owner_requested {
            return Err(DomainError::validation(
                ValidationReason::RemoveOwnerFromTeam,
            ));
        }

        Ok(change)
    }

    pub async fn find_by_alias(&self, alias: &Alias) -> Result<Team, DomainError> {
        self.store.find_team_by_alias(alias).await
    }

    pub async fn exists(&self, alias: &Alias) -> Result<bool, DomainError> {
        match self.store.find_team_by_alias(alias).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Look up a team the user belongs to
    pub async fn resolve(&self, alias: &Alias, user: &User) -> Result<Team, DomainError> {
        let team = self.store.find_team_by_alias(alias).await?;
        team.contains_user(user.email())?;
        Ok(team)
    }

    pub async fn user_teams(&self, user: &User) -> Result<Vec<Team>, DomainError> {
        self.store.user_teams(user).await
    }

    async fn user_exists(&self, email: &Email) -> Result<bool, DomainError> {
        match self.store.find_user_by_email(email).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
