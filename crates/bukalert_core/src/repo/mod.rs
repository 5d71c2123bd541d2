//! Data access contracts for the bookmark store.
//!
//! # Responsibility
//! - Define the row-level contract core needs from the bookmark backend.
//! - Keep SQL details out of the store and controller.
//!
//! # Invariants
//! - Inserts are idempotent per `(user_id, team_id)`.
//! - Deletes succeed whether or not a matching row exists.

pub mod bookmark_repo;
