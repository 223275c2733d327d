//! Publication of service descriptors to the discovery registry

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, info_span, Instrument};

use crate::domain::registry::CoordinationStore;
use crate::domain::service::ServiceSpec;
use crate::domain::DomainError;
use crate::infrastructure::metrics::{record_publication, PublicationOutcome};

/// Announces service descriptors to the coordination store.
///
/// Each call is a single round trip with no retry. Descriptors are keyed by
/// their handle, so re-publishing replaces the previous descriptor.
#[derive(Debug, Clone)]
pub struct Publisher {
    store: Arc<dyn CoordinationStore>,
}

impl Publisher {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    pub async fn publish(&self, spec: &ServiceSpec) -> Result<(), DomainError> {
        async {
            debug!("start");
            info!(handle = %spec.handle, team = %spec.team, backends = spec.backends.len(), "publish");

            let result = self.put(spec).await;

            match &result {
                Ok(()) => record_publication(PublicationOutcome::Published),
                Err(e) => {
                    error!(handle = %spec.handle, error = %e, "Failed to publish service");
                    record_publication(PublicationOutcome::Failed);
                }
            }

            debug!("end");
            result
        }
        .instrument(info_span!("publisher"))
        .await
    }

    /// Removes the descriptor stored under `handle`
    pub async fn retract(&self, handle: &str) -> Result<(), DomainError> {
        async {
            info!(handle = %handle, "retract");

            let result = self
                .store
                .delete(handle)
                .await
                .map_err(|e| DomainError::publication(e.to_string()));

            match &result {
                Ok(()) => record_publication(PublicationOutcome::Retracted),
                Err(e) => {
                    error!(handle = %handle, error = %e, "Failed to retract service");
                    record_publication(PublicationOutcome::Failed);
                }
            }

            result
        }
        .instrument(info_span!("publisher"))
        .await
    }

    async fn put(&self, spec: &ServiceSpec) -> Result<(), DomainError> {
        let payload = serde_json::to_vec(spec).map_err(|e| {
            DomainError::publication(format!("Failed to marshal service spec: {}", e))
        })?;

        self.store
            .put(&spec.handle, Bytes::from(payload))
            .await
            .map_err(|e| match e {
                DomainError::Publication { .. } => e,
                other => DomainError::publication(other.to_string()),
            })
    }
}
