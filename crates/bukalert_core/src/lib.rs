//! Core logic for BukAlert, an emergency-team locator.
//! Bookmark synchronization, team selection and distance rules live here;
//! rendering, authentication and map widgets are host concerns.

pub mod config;
pub mod db;
pub mod directory;
pub mod geo;
pub mod logging;
pub mod model;
pub mod position;
pub mod repo;
pub mod service;
pub mod session;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use directory::{DirectoryError, StaticTeamDirectory, TeamDirectory};
pub use geo::{format_km, haversine_km, round_km, Coordinate};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bookmark::Bookmark;
pub use model::call::{CallHistory, CallType};
pub use model::identity::{Identity, UserId};
pub use model::team::{Team, TeamId, TeamKind, TeamValidationError};
pub use position::{FixedPositionProvider, PositionError, PositionProvider};
pub use repo::bookmark_repo::{BookmarkRepository, RepoError, RepoResult, SqliteBookmarkRepository};
pub use service::bookmark_store::{BookmarkError, BookmarkResult, BookmarkStore, BookmarkToggle};
pub use service::selection::{CallError, SelectionController};
pub use session::{resolve_route, Page, RouteDecision, Session, SessionState};
pub use view::{DashboardControlsView, MapMarker, MapViewport, TeamInfoView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
