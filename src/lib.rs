//! APIHub directory
//!
//! Teams register services under unique subdomains. Membership and
//! ownership gate every change, and accepted services are announced to a
//! coordination store where routers and gateways discover them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::registry::CoordinationStore;
use domain::DirectoryStore;
use infrastructure::{
    cache::CacheFactory,
    publisher::Publisher,
    registry::create_coordination_store,
    service::ServiceDirectory,
    store::DocumentStore,
    team::TeamDirectory,
    user::UserDirectory,
};
use tracing::info;

/// The directory services, sharing one store and one publisher
#[derive(Debug)]
pub struct Directory<S: DirectoryStore> {
    pub store: Arc<S>,
    pub users: UserDirectory<S>,
    pub teams: TeamDirectory<S>,
    pub services: ServiceDirectory<S>,
}

impl<S: DirectoryStore> Directory<S> {
    pub fn new(store: Arc<S>, registry: Arc<dyn CoordinationStore>) -> Self {
        Self {
            users: UserDirectory::new(Arc::clone(&store)),
            teams: TeamDirectory::new(Arc::clone(&store)),
            services: ServiceDirectory::new(Arc::clone(&store), Publisher::new(registry)),
            store,
        }
    }
}

/// Create the directory with default configuration
pub async fn create_directory() -> anyhow::Result<Directory<DocumentStore>> {
    create_directory_with_config(&AppConfig::default()).await
}

/// Create the directory with custom configuration
pub async fn create_directory_with_config(
    config: &AppConfig,
) -> anyhow::Result<Directory<DocumentStore>> {
    let tokens = CacheFactory::new().create(&config.tokens).await?;
    let registry = create_coordination_store(&config.registry)?;

    info!(
        tokens = ?config.tokens.backend,
        registry = ?config.registry.backend,
        "Directory initialized"
    );

    Ok(Directory::new(
        Arc::new(DocumentStore::with_token_cache(tokens)),
        registry,
    ))
}
