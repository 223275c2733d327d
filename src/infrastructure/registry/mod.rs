//! Registry infrastructure - coordination store clients

mod consul;
mod factory;
mod in_memory;

pub use consul::{ConsulConfig, ConsulKvStore};
pub use factory::create_coordination_store;
pub use in_memory::InMemoryCoordinationStore;
