//! Emergency team catalog entry.
//!
//! # Responsibility
//! - Define the immutable team record referenced by id across core.
//! - Provide display metadata per team kind.
//!
//! # Invariants
//! - `id` and `name` are non-empty.
//! - `latitude` is within [-90, 90] and `longitude` within [-180, 180].
//! - `hotline` is an optionally `+`-prefixed sequence of digit groups.

use crate::geo::Coordinate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HOTLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]+(?:[ -][0-9]+)*$").expect("valid hotline regex"));

/// Catalog identifier of a team.
pub type TeamId = String;

/// Response category of an emergency team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamKind {
    /// Municipal disaster risk reduction and management (rescue).
    Mdrrm,
    Police,
    Fire,
}

impl TeamKind {
    /// Stable string id used in catalog data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mdrrm => "mdrrm",
            Self::Police => "police",
            Self::Fire => "fire",
        }
    }

    /// User-facing label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mdrrm => "MDRRM",
            Self::Police => "Police",
            Self::Fire => "Fire Department",
        }
    }

    /// Map marker fill color.
    pub fn marker_color(self) -> &'static str {
        match self {
            Self::Mdrrm => "red",
            Self::Police => "blue",
            Self::Fire => "orange",
        }
    }
}

/// Validation failures for catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub enum TeamValidationError {
    EmptyId,
    EmptyName,
    InvalidHotline(String),
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
}

impl Display for TeamValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "team id cannot be empty"),
            Self::EmptyName => write!(f, "team name cannot be empty"),
            Self::InvalidHotline(value) => write!(f, "invalid hotline `{value}`"),
            Self::CoordinateOutOfRange {
                latitude,
                longitude,
            } => write!(f, "coordinate ({latitude}, {longitude}) is out of range"),
        }
    }
}

impl Error for TeamValidationError {}

/// Emergency-response entity with a fixed location and contact number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Serialized as `type` to match the catalog schema.
    #[serde(rename = "type")]
    pub kind: TeamKind,
    pub hotline: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Team {
    pub fn new(
        id: impl Into<TeamId>,
        name: impl Into<String>,
        kind: TeamKind,
        hotline: impl Into<String>,
        position: Coordinate,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            hotline: hotline.into(),
            latitude: position.latitude,
            longitude: position.longitude,
            address: address.into(),
        }
    }

    /// Team location as a coordinate.
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Checks catalog invariants.
    pub fn validate(&self) -> Result<(), TeamValidationError> {
        if self.id.trim().is_empty() {
            return Err(TeamValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(TeamValidationError::EmptyName);
        }
        if !HOTLINE_RE.is_match(self.hotline.trim()) {
            return Err(TeamValidationError::InvalidHotline(self.hotline.clone()));
        }
        if !self.position().is_valid() {
            return Err(TeamValidationError::CoordinateOutOfRange {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(())
    }

    /// Hotline with separators stripped, suitable for a `tel:` link.
    pub fn dial_string(&self) -> String {
        self.hotline
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Team, TeamKind, TeamValidationError};
    use crate::geo::Coordinate;

    fn team(hotline: &str) -> Team {
        Team::new(
            "9",
            "Test Rescue",
            TeamKind::Mdrrm,
            hotline,
            Coordinate::new(8.0, 125.0),
            "Somewhere",
        )
    }

    #[test]
    fn validate_accepts_spaced_international_hotline() {
        assert!(team("+63 917 123 4567").validate().is_ok());
        assert!(team("911").validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_hotline() {
        let err = team("call us").validate().unwrap_err();
        assert!(matches!(err, TeamValidationError::InvalidHotline(_)));
        assert!(team("+63  917").validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let mut entry = team("911");
        entry.latitude = 91.0;
        assert!(matches!(
            entry.validate(),
            Err(TeamValidationError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn dial_string_strips_separators() {
        assert_eq!(team("+63 917 123 4567").dial_string(), "+639171234567");
    }

    #[test]
    fn kind_metadata_matches_catalog_labels() {
        assert_eq!(TeamKind::Fire.display_name(), "Fire Department");
        assert_eq!(TeamKind::Police.marker_color(), "blue");
        assert_eq!(TeamKind::Mdrrm.as_str(), "mdrrm");
    }
}
