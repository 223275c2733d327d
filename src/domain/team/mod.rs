//! Team domain module
//!
//! Teams own services and gate access to them through membership.

mod entity;
mod membership;
mod repository;
mod validation;

pub use entity::{Alias, Team};
pub use membership::{MembershipChange, SkipReason};
pub use repository::TeamStore;
pub use validation::{slugify, validate_team_name, TeamValidationError};
