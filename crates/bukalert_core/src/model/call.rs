//! Call history record.
//!
//! The `call_history` table exists in the schema but nothing in core reads
//! or writes it yet; the dashboard always reports a count of zero.

use crate::model::identity::UserId;
use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};

/// Call medium for a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Video,
    Voice,
}

impl CallType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Voice => "voice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallHistory {
    pub id: String,
    pub user_id: UserId,
    pub team_id: TeamId,
    pub call_type: CallType,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    /// Call length in seconds, when the call connected.
    pub duration: Option<i64>,
}
