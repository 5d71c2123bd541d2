//! Domain model for identities, teams and bookmarks.
//!
//! # Responsibility
//! - Define canonical data structures shared by store, directory and views.
//! - Keep storage-facing records (`Bookmark`, `CallHistory`) separate from
//!   catalog entries (`Team`).
//!
//! # Invariants
//! - An `Identity` is either fully present or absent; there is no partial
//!   identity state.
//! - At most one `Bookmark` exists per `(user_id, team_id)` pair.

pub mod bookmark;
pub mod call;
pub mod identity;
pub mod team;
