//! Storage infrastructure - document storage implementations

mod in_memory;

pub use in_memory::InMemoryStorage;
