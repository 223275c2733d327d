//! User directory

mod service;

pub use service::UserDirectory;
