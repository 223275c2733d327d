//! Outcome of a batched membership mutation

use serde::Serialize;

use crate::domain::user::Email;

/// Why a candidate email was left out of a membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a well-formed email
    InvalidEmail,
    /// No registered user has this email
    UnknownUser,
    /// Already a member (add)
    AlreadyMember,
    /// Not a member (remove)
    NotMember,
    /// The owner cannot be removed
    Owner,
}

/// Partial-success result of `add_users` / `remove_users`.
///
/// Candidates that cannot be applied are skipped rather than failing the
/// whole batch; they are reported here instead of being dropped silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipChange {
    pub applied: Vec<Email>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl MembershipChange {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub(crate) fn apply(&mut self, email: Email) {
        self.applied.push(email);
    }

    pub(crate) fn skip(&mut self, email: impl Into<String>, reason: SkipReason) {
        self.skipped.push((email.into(), reason));
    }

    pub fn skipped_for(&self, reason: SkipReason) -> impl Iterator<Item = &str> {
        self.skipped
            .iter()
            .filter(move |(_, r)| *r == reason)
            .map(|(email, _)| email.as_str())
    }
}
