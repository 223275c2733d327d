//! Token domain - short-lived credentials issued at login

mod entity;
mod repository;

pub use entity::TokenInfo;
pub use repository::{TokenStore, TokenStoreExt};
