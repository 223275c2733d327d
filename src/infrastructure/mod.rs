//! Infrastructure layer - port implementations and the directory services

pub mod auth;
pub mod cache;
pub mod logging;
pub mod metrics;
pub mod publisher;
pub mod registry;
pub mod service;
pub mod storage;
pub mod store;
pub mod team;
pub mod user;
