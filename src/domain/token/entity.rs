//! Token info entity

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// An issued token and the user it authenticates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub user: User,
    /// Lifetime in minutes
    pub expires: u32,
    pub created_at: DateTime<Utc>,
}

impl TokenInfo {
    pub fn new(
        token: impl Into<String>,
        token_type: impl Into<String>,
        user: User,
        expires: u32,
    ) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
            user,
            expires,
            created_at: Utc::now(),
        }
    }

    /// Key of the record looked up by token type and user
    pub fn user_key(&self) -> String {
        Self::key_for(&self.token_type, &self.user)
    }

    pub fn key_for(token_type: &str, user: &User) -> String {
        format!("{}: {}", token_type, user.email())
    }

    /// TTL shared by both records of this token
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.expires) * 60)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + chrono::Duration::minutes(i64::from(self.expires))
    }
}
