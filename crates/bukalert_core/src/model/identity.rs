//! Authenticated identity record.

use serde::{Deserialize, Serialize};

/// Stable user identifier issued by the session provider.
pub type UserId = String;

/// Authenticated user governing which bookmarks are visible and mutable.
///
/// Owned by the session provider. Core code treats it as immutable and
/// compares identities by `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
}

impl Identity {
    pub fn new(
        id: impl Into<UserId>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: full_name.into(),
        }
    }

    /// Returns whether `other` refers to the same authenticated user.
    pub fn same_user(&self, other: &Identity) -> bool {
        self.id == other.id
    }
}
