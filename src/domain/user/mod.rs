//! User domain
//!
//! Users are the identity every team and service refers to by email.

mod entity;
mod repository;
mod validation;

pub use entity::{Email, User};
pub use repository::UserStore;
pub use validation::{validate_email, validate_password, UserValidationError};
