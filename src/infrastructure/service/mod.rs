//! Service directory

mod directory;
mod outcome;

pub use directory::{NewService, ServiceDirectory};
pub use outcome::{Committed, PublicationStatus};
