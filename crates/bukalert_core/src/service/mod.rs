//! Core use-case services.
//!
//! # Responsibility
//! - Mediate between repositories and presentation callers.
//! - Keep UI hosts decoupled from storage details.

pub mod bookmark_store;
pub mod selection;
