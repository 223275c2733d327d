//! Result shapes for writes that are announced after they commit

use crate::domain::DomainError;

/// What happened to the registry after a committed write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationStatus {
    Published,
    Retracted,
    /// The write is committed but the registry was not updated
    Failed(DomainError),
}

impl PublicationStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub(crate) fn from_result(result: Result<(), DomainError>, ok: Self) -> Self {
        match result {
            Ok(()) => ok,
            Err(e) => Self::Failed(e),
        }
    }
}

/// A persisted value and the outcome of announcing it
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub value: T,
    pub publication: PublicationStatus,
}

impl<T> Committed<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_status_from_result() {
        assert_eq!(
            PublicationStatus::from_result(Ok(()), PublicationStatus::Published),
            PublicationStatus::Published
        );

        let failed = PublicationStatus::from_result(
            Err(DomainError::publication("agent down")),
            PublicationStatus::Published,
        );
        assert!(failed.is_failed());
    }
}
