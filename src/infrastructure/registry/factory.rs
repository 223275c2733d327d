//! Coordination store selection from configuration

use std::sync::Arc;

use crate::config::{RegistryBackend, RegistryConfig};
use crate::domain::registry::CoordinationStore;

use super::consul::{ConsulConfig, ConsulKvStore};
use super::in_memory::InMemoryCoordinationStore;

pub fn create_coordination_store(
    config: &RegistryConfig,
) -> anyhow::Result<Arc<dyn CoordinationStore>> {
    match config.backend {
        RegistryBackend::Memory => Ok(Arc::new(InMemoryCoordinationStore::new())),
        RegistryBackend::Consul => {
            let mut consul = ConsulConfig::new(config.address.clone())
                .with_key_prefix(config.key_prefix.clone())
                .with_timeout(config.timeout());

            if let Some(token) = &config.token {
                consul = consul.with_token(token.clone());
            }

            Ok(Arc::new(ConsulKvStore::new(consul)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory_and_consul() {
        assert!(create_coordination_store(&RegistryConfig::default()).is_ok());

        let config = RegistryConfig {
            backend: RegistryBackend::Consul,
            token: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(create_coordination_store(&config).is_ok());
    }
}
