//! HTTP boundary - error mapping for the directory operations

pub mod error;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
