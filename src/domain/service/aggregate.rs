//! Partial-success result for fan-out lookups

use crate::domain::DomainError;

/// Items gathered from several lookups, some of which may have failed.
/// Each failure is tagged with the key of the lookup that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<T> {
    pub items: Vec<T>,
    pub failures: Vec<(String, DomainError)>,
}

impl<T> Default for Aggregate<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Aggregate<T> {
    /// A result where the whole lookup failed under `key`
    pub fn failed(key: impl Into<String>, error: DomainError) -> Self {
        Self {
            items: Vec::new(),
            failures: vec![(key.into(), error)],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
