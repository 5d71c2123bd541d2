//! Selection and interaction controller for the dashboard.
//!
//! # Responsibility
//! - Hold the selected team and the last known user location.
//! - Route user intents (bookmark toggle, locate, call) to collaborators.
//! - Build view models from current state.
//!
//! # Invariants
//! - `selected_team` and `user_location` vary independently.
//! - A failed location request keeps the previous location.

use crate::geo::{haversine_km, Coordinate};
use crate::model::team::Team;
use crate::position::{PositionError, PositionProvider};
use crate::repo::bookmark_repo::BookmarkRepository;
use crate::service::bookmark_store::{BookmarkResult, BookmarkStore, BookmarkToggle};
use crate::session::Session;
use crate::view::{DashboardControlsView, MapViewport, TeamInfoView};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Call request outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Calling is not available in this release.
    NotImplemented(String),
}

impl Display for CallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotImplemented(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CallError {}

/// Dashboard controller owning the bookmark store.
pub struct SelectionController<R: BookmarkRepository, P: PositionProvider> {
    bookmarks: BookmarkStore<R>,
    positioning: P,
    selected_team: Option<Team>,
    user_location: Option<Coordinate>,
}

impl<R: BookmarkRepository, P: PositionProvider> SelectionController<R, P> {
    pub fn new(bookmarks: BookmarkStore<R>, positioning: P) -> Self {
        Self {
            bookmarks,
            positioning,
            selected_team: None,
            user_location: None,
        }
    }

    pub fn bookmarks(&self) -> &BookmarkStore<R> {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut BookmarkStore<R> {
        &mut self.bookmarks
    }

    /// Feeds the session's identity to the bookmark store.
    ///
    /// Ignored while the session is still loading.
    pub fn sync_session(&mut self, session: &Session) -> BookmarkResult<()> {
        if session.is_loading() {
            return Ok(());
        }
        self.bookmarks.set_identity(session.identity().cloned())
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.selected_team.as_ref()
    }

    pub fn select(&mut self, team: Team) {
        self.selected_team = Some(team);
    }

    pub fn deselect(&mut self) {
        self.selected_team = None;
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// Toggles the bookmark for `team`.
    ///
    /// Failures are already logged by the store; the result is returned for
    /// callers that want to surface it.
    pub fn request_bookmark_toggle(&mut self, team: &Team) -> BookmarkResult<BookmarkToggle> {
        self.bookmarks.toggle(&team.id)
    }

    /// Bookmark status of the selected team, false when none is selected.
    pub fn current_bookmark_status(&self) -> bool {
        self.bookmark_status_for(self.selected_team.as_ref())
    }

    pub fn bookmark_status_for(&self, team: Option<&Team>) -> bool {
        team.is_some_and(|team| self.bookmarks.is_bookmarked(&team.id))
    }

    /// Asks the host for a one-shot position fix.
    pub fn request_location(&mut self) -> Result<Coordinate, PositionError> {
        let outcome = self.positioning.current_position().and_then(|position| {
            if position.is_valid() {
                Ok(position)
            } else {
                Err(PositionError::Unavailable(format!(
                    "out of range fix ({}, {})",
                    position.latitude, position.longitude
                )))
            }
        });

        match outcome {
            Ok(position) => {
                self.user_location = Some(position);
                info!("event=location_request module=selection status=ok");
                Ok(position)
            }
            Err(err) => {
                warn!(
                    "event=location_request module=selection status=error kept_previous={} error={err}",
                    self.user_location.is_some()
                );
                Err(err)
            }
        }
    }

    /// Video calling is stubbed; every request is declined.
    pub fn request_video_call(&self, team: &Team) -> Result<(), CallError> {
        info!(
            "event=video_call module=selection status=unsupported team_id={}",
            team.id
        );
        Err(CallError::NotImplemented(format!(
            "Video call to {} will be implemented in the next project",
            team.name
        )))
    }

    /// Distance from the user location to `team`, unrounded.
    pub fn distance_km_to(&self, team: &Team) -> Option<f64> {
        self.user_location
            .map(|location| haversine_km(location, team.position()))
    }

    /// Popup model for the selected team.
    pub fn team_info(&self) -> Option<TeamInfoView> {
        self.selected_team.as_ref().map(|team| {
            TeamInfoView::build(
                team,
                self.user_location,
                self.bookmarks.is_bookmarked(&team.id),
            )
        })
    }

    pub fn controls(&self) -> DashboardControlsView {
        DashboardControlsView::build(self.user_location, self.bookmarks.len())
    }

    pub fn viewport(&self) -> MapViewport {
        MapViewport::for_user_location(self.user_location)
    }
}
