//! Team catalog lookup.
//!
//! # Responsibility
//! - Provide id -> `Team` lookup behind a swappable `TeamDirectory` trait.
//! - Ship the built-in Bukidnon catalog.
//!
//! # Invariants
//! - Team ids are unique within a directory.
//! - Every team passes `Team::validate`.

use crate::geo::{haversine_km, Coordinate};
use crate::model::team::{Team, TeamId, TeamKind, TeamValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryError {
    InvalidTeam {
        team_id: TeamId,
        source: TeamValidationError,
    },
    DuplicateTeamId(TeamId),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTeam { team_id, source } => {
                write!(f, "invalid team `{team_id}`: {source}")
            }
            Self::DuplicateTeamId(team_id) => write!(f, "duplicate team id `{team_id}`"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTeam { source, .. } => Some(source),
            Self::DuplicateTeamId(_) => None,
        }
    }
}

/// Read-only source of emergency teams.
pub trait TeamDirectory {
    /// All teams in catalog order.
    fn teams(&self) -> &[Team];

    fn team(&self, id: &str) -> Option<&Team> {
        self.teams().iter().find(|team| team.id == id)
    }

    fn teams_of_kind(&self, kind: TeamKind) -> Vec<&Team> {
        self.teams().iter().filter(|team| team.kind == kind).collect()
    }

    /// Teams paired with their distance from `from`, nearest first.
    ///
    /// Ties keep catalog order.
    fn teams_by_distance(&self, from: Coordinate) -> Vec<(&Team, f64)> {
        let mut ranked: Vec<(&Team, f64)> = self
            .teams()
            .iter()
            .map(|team| (team, haversine_km(from, team.position())))
            .collect();
        ranked.sort_by(|left, right| left.1.total_cmp(&right.1));
        ranked
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticTeamDirectory {
    teams: Vec<Team>,
}

impl StaticTeamDirectory {
    /// Builds a directory after validating every entry.
    pub fn from_teams(teams: Vec<Team>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::new();
        for team in &teams {
            team.validate()
                .map_err(|source| DirectoryError::InvalidTeam {
                    team_id: team.id.clone(),
                    source,
                })?;
            if !seen.insert(team.id.as_str()) {
                return Err(DirectoryError::DuplicateTeamId(team.id.clone()));
            }
        }
        Ok(Self { teams })
    }

    /// Emergency teams of Bukidnon province.
    pub fn bukidnon() -> Self {
        let malaybalay = Coordinate::new(8.1542, 125.1256);
        let valencia = Coordinate::new(7.9064, 125.0944);
        Self {
            teams: vec![
                Team::new(
                    "1",
                    "MDRRMC Pangantucan Rescue Team",
                    TeamKind::Mdrrm,
                    "+63 917 123 4567",
                    Coordinate::new(7.8333, 124.8333),
                    "Pangantucan, Bukidnon",
                ),
                Team::new(
                    "2",
                    "Bukidnon Provincial Police Office",
                    TeamKind::Police,
                    "+63 917 234 5678",
                    malaybalay,
                    "Malaybalay City, Bukidnon",
                ),
                Team::new(
                    "3",
                    "Bukidnon Fire Station",
                    TeamKind::Fire,
                    "+63 917 345 6789",
                    malaybalay,
                    "Malaybalay City, Bukidnon",
                ),
                Team::new(
                    "4",
                    "Valencia City MDRRM",
                    TeamKind::Mdrrm,
                    "+63 917 456 7890",
                    valencia,
                    "Valencia City, Bukidnon",
                ),
                Team::new(
                    "5",
                    "Valencia City Police Station",
                    TeamKind::Police,
                    "+63 917 567 8901",
                    valencia,
                    "Valencia City, Bukidnon",
                ),
                Team::new(
                    "6",
                    "Valencia City Fire Department",
                    TeamKind::Fire,
                    "+63 917 678 9012",
                    valencia,
                    "Valencia City, Bukidnon",
                ),
            ],
        }
    }
}

impl TeamDirectory for StaticTeamDirectory {
    fn teams(&self) -> &[Team] {
        &self.teams
    }
}
