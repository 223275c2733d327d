//! Team entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{slugify, validate_team_name, TeamValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::Email;
use crate::domain::{DomainError, ForbiddenReason};

/// Team alias - the team's unique slug.
///
/// Every alias is slugified on construction, including on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    pub fn new(input: &str) -> Self {
        Self(slugify(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Alias {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<Alias> for String {
    fn from(alias: Alias) -> Self {
        alias.0
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for Alias {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Team entity.
///
/// The owner is the user who created the team and is always one of its
/// members. Member order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    alias: Alias,
    users: Vec<Email>,
    owner: Email,
}

impl Team {
    /// Create a team whose only member is its owner
    pub fn new(name: impl Into<String>, alias: Alias, owner: Email) -> Self {
        Self {
            name: name.into(),
            alias,
            users: vec![owner.clone()],
            owner,
        }
    }

    // Getters

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn users(&self) -> &[Email] {
        &self.users
    }

    pub fn owner(&self) -> &Email {
        &self.owner
    }

    pub fn is_owner(&self, email: &Email) -> bool {
        &self.owner == email
    }

    /// Position of `email` among the members
    pub fn contains_user(&self, email: &Email) -> Result<usize, DomainError> {
        self.users
            .iter()
            .position(|u| u == email)
            .ok_or_else(|| DomainError::forbidden(ForbiddenReason::UserNotInTeam))
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub(crate) fn push_user(&mut self, email: Email) {
        self.users.push(email);
    }

    /// Removes the member at `index` by moving the last member into its slot
    pub(crate) fn swap_remove_user(&mut self, index: usize) -> Email {
        self.users.swap_remove(index)
    }
}

impl StorageEntity for Team {
    type Key = Alias;

    const KIND: &'static str = "Team";

    fn key(&self) -> &Self::Key {
        &self.alias
    }
}
