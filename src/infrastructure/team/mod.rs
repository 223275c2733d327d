//! Team directory

mod service;

pub use service::{NewTeam, TeamDirectory};
