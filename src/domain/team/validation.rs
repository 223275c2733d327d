//! Team validation and alias slugification

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::{DomainError, ValidationReason};

/// Runs of anything that is not a lowercase ASCII letter or digit
static SLUG_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team alias cannot be empty")]
    EmptyAlias,
}

/// Turn free text into a key-safe slug.
///
/// Lower-cases the input, collapses every run of non-alphanumeric characters
/// into a single `-` and trims leading and trailing separators. The output
/// only contains `[a-z0-9-]` without edge hyphens, so applying it twice is
/// the same as applying it once.
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    SLUG_SEPARATOR
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    Ok(())
}

impl From<TeamValidationError> for DomainError {
    fn from(error: TeamValidationError) -> Self {
        match error {
            TeamValidationError::EmptyName | TeamValidationError::EmptyAlias => {
                DomainError::validation(ValidationReason::MissingRequiredFields("Team"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme"), "acme");
        assert_eq!(slugify("My  Awesome Team!"), "my-awesome-team");
        assert_eq!(slugify("  --Backstage_Team--  "), "backstage-team");
        assert_eq!(slugify("team 2.0"), "team-2-0");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in ["Acme", "My  Awesome Team!", "ÁÉÍ time", "a--b", "-x-", "", "Ünïcödé Team"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("My Team").is_ok());
        assert!(validate_team_name("Team with spaces & symbols!").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
        assert_eq!(validate_team_name("   "), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_long_team_name_is_accepted() {
        assert!(validate_team_name(&"a".repeat(101)).is_ok());
        assert!(validate_team_name(&"Team ".repeat(500)).is_ok());
    }

    #[test]
    fn test_missing_fields_maps_to_validation() {
        let error: DomainError = TeamValidationError::EmptyName.into();
        assert_eq!(
            error,
            DomainError::validation(ValidationReason::MissingRequiredFields("Team"))
        );
    }
}
