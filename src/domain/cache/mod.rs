//! Cache domain - expiring key/value records

mod repository;

pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
