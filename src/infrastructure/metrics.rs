//! Directory and publication counters
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these are no-ops.

use metrics::counter;

/// Outcome label of a publication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationOutcome {
    Published,
    Retracted,
    Failed,
}

impl PublicationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Retracted => "retracted",
            Self::Failed => "failed",
        }
    }
}

/// Record a publication attempt against the coordination store
pub fn record_publication(outcome: PublicationOutcome) {
    counter!("apihub_publications_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record a committed directory mutation, e.g. ("team", "create")
pub fn record_mutation(entity: &'static str, operation: &'static str) {
    counter!(
        "apihub_directory_mutations_total",
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}
