//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Natural key of a stored document
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for backends that require string keys
    fn as_str(&self) -> &str;
}

/// A whole document persisted under its natural key
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    /// Human readable entity name, used in not-found messages
    const KIND: &'static str;

    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::{Service, Subdomain};
    use crate::domain::team::{Alias, Team};
    use crate::domain::user::{Email, User};

    #[test]
    fn test_entities_are_keyed_by_natural_key() {
        let owner = Email::new("a@x.com").unwrap();
        let user = User::new(owner.clone(), "secret");
        assert_eq!(user.key().as_str(), "a@x.com");

        let team = Team::new("Acme", Alias::new("Acme"), owner.clone());
        assert_eq!(team.key().as_str(), "acme");

        let service = Service::new(Subdomain::new("backstage").unwrap(), team.alias().clone(), owner);
        assert_eq!(service.key().as_str(), "backstage");
    }

    #[test]
    fn test_entity_kinds() {
        assert_eq!(User::KIND, "User");
        assert_eq!(Team::KIND, "Team");
        assert_eq!(Service::KIND, "Service");
    }
}
