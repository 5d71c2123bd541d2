//! Bookmark record mirrored from the bookmark store.
//!
//! # Invariants
//! - `id` is a UUID v4 string assigned at insert time.
//! - `created_at` is unix epoch milliseconds assigned by storage.

use crate::model::identity::UserId;
use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};

/// User-to-team association persisted remotely and mirrored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: UserId,
    pub team_id: TeamId,
    pub created_at: i64,
}
