//! Directory store - the storage port over document storage and the token cache

mod document_store;

pub use document_store::DocumentStore;
