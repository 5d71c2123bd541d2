//! Render-ready projections for the dashboard.
//!
//! # Responsibility
//! - Turn teams, user location and bookmark status into display values.
//! - Keep label and formatting rules out of the rendering host.
//!
//! # Invariants
//! - Projections are pure; building one never touches a repository.

use crate::geo::{self, Coordinate};
use crate::model::team::{Team, TeamId};
use serde::Serialize;

/// Map center used before the user location is known (Malaybalay City).
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
    latitude: 8.1542,
    longitude: 125.1256,
};
pub const DEFAULT_MAP_ZOOM: u8 = 10;
pub const USER_LOCATION_ZOOM: u8 = 12;

/// Call history is not recorded yet.
const CALL_HISTORY_COUNT: usize = 0;

/// Popup content for the selected team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamInfoView {
    pub team_id: TeamId,
    pub name: String,
    pub kind_label: &'static str,
    pub marker_color: &'static str,
    pub hotline: String,
    pub dial_string: String,
    pub address: String,
    /// `"<km> km away"`, present only when the user location is known.
    pub distance_text: Option<String>,
    pub is_bookmarked: bool,
    pub bookmark_label: &'static str,
}

impl TeamInfoView {
    pub fn build(team: &Team, user_location: Option<Coordinate>, is_bookmarked: bool) -> Self {
        let distance_text = user_location.map(|location| {
            format!(
                "{} km away",
                geo::format_km(geo::haversine_km(location, team.position()))
            )
        });

        Self {
            team_id: team.id.clone(),
            name: team.name.clone(),
            kind_label: team.kind.display_name(),
            marker_color: team.kind.marker_color(),
            hotline: team.hotline.clone(),
            dial_string: team.dial_string(),
            address: team.address.clone(),
            distance_text,
            is_bookmarked,
            bookmark_label: if is_bookmarked {
                "Bookmarked"
            } else {
                "Bookmark"
            },
        }
    }
}

/// Bottom control bar state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardControlsView {
    pub location_button_label: &'static str,
    /// `"lat, lng"` with four decimals.
    pub location_text: Option<String>,
    pub call_history_count: usize,
    pub bookmark_count: usize,
}

impl DashboardControlsView {
    pub fn build(user_location: Option<Coordinate>, bookmark_count: usize) -> Self {
        Self {
            location_button_label: if user_location.is_some() {
                "Update"
            } else {
                "Get Location"
            },
            location_text: user_location
                .map(|location| format!("{:.4}, {:.4}", location.latitude, location.longitude)),
            call_history_count: CALL_HISTORY_COUNT,
            bookmark_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub team_id: TeamId,
    pub title: String,
    pub position: Coordinate,
    pub color: &'static str,
}

/// Camera placement for the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub center: Coordinate,
    pub zoom: u8,
}

impl MapViewport {
    /// Centers on the user when known, otherwise on the province default.
    pub fn for_user_location(user_location: Option<Coordinate>) -> Self {
        match user_location {
            Some(center) => Self {
                center,
                zoom: USER_LOCATION_ZOOM,
            },
            None => Self {
                center: DEFAULT_MAP_CENTER,
                zoom: DEFAULT_MAP_ZOOM,
            },
        }
    }
}

/// One marker per team, in catalog order.
pub fn markers(teams: &[Team]) -> Vec<MapMarker> {
    teams
        .iter()
        .map(|team| MapMarker {
            team_id: team.id.clone(),
            title: team.name.clone(),
            position: team.position(),
            color: team.kind.marker_color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{markers, DashboardControlsView, MapViewport, TeamInfoView, DEFAULT_MAP_ZOOM};
    use crate::directory::{StaticTeamDirectory, TeamDirectory};
    use crate::geo::Coordinate;

    #[test]
    fn team_info_shows_distance_only_with_location() {
        let directory = StaticTeamDirectory::bukidnon();
        let team = directory.team("1").unwrap();

        let without = TeamInfoView::build(team, None, false);
        assert_eq!(without.distance_text, None);
        assert_eq!(without.bookmark_label, "Bookmark");
        assert_eq!(without.kind_label, "MDRRM");

        let with = TeamInfoView::build(team, Some(Coordinate::new(8.1542, 125.1256)), true);
        assert_eq!(with.distance_text.as_deref(), Some("48.1 km away"));
        assert_eq!(with.bookmark_label, "Bookmarked");
        assert_eq!(with.dial_string, "+639171234567");
    }

    #[test]
    fn controls_label_follows_location_state() {
        let empty = DashboardControlsView::build(None, 0);
        assert_eq!(empty.location_button_label, "Get Location");
        assert_eq!(empty.location_text, None);

        let located = DashboardControlsView::build(Some(Coordinate::new(8.15421, 125.12559)), 2);
        assert_eq!(located.location_button_label, "Update");
        assert_eq!(located.location_text.as_deref(), Some("8.1542, 125.1256"));
        assert_eq!(located.call_history_count, 0);
        assert_eq!(located.bookmark_count, 2);
    }

    #[test]
    fn viewport_zooms_in_on_user_location() {
        assert_eq!(MapViewport::for_user_location(None).zoom, DEFAULT_MAP_ZOOM);
        let here = Coordinate::new(7.9, 125.0);
        let viewport = MapViewport::for_user_location(Some(here));
        assert_eq!(viewport.center, here);
        assert_eq!(viewport.zoom, 12);
    }

    #[test]
    fn markers_follow_catalog_order_and_colors() {
        let directory = StaticTeamDirectory::bukidnon();
        let colors: Vec<&str> = markers(directory.teams())
            .iter()
            .map(|marker| marker.color)
            .collect();
        assert_eq!(colors, vec!["red", "blue", "orange", "red", "blue", "orange"]);
    }
}
