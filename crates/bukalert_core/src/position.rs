//! Host positioning capability.
//!
//! The host environment (browser geolocation, OS location service) sits
//! behind `PositionProvider`; core only needs a one-shot fix.

use crate::geo::Coordinate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a position request produced no coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    PermissionDenied,
    Unavailable(String),
    Timeout,
}

impl Display for PositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::Unavailable(reason) => write!(f, "location unavailable: {reason}"),
            Self::Timeout => write!(f, "location request timed out"),
        }
    }
}

impl Error for PositionError {}

/// One-shot positioning request.
pub trait PositionProvider {
    fn current_position(&self) -> Result<Coordinate, PositionError>;
}

impl<T: PositionProvider + ?Sized> PositionProvider for &T {
    fn current_position(&self) -> Result<Coordinate, PositionError> {
        (**self).current_position()
    }
}

/// Provider that always answers with the same outcome.
#[derive(Debug, Clone)]
pub struct FixedPositionProvider {
    outcome: Result<Coordinate, PositionError>,
}

impl FixedPositionProvider {
    pub fn at(position: Coordinate) -> Self {
        Self {
            outcome: Ok(position),
        }
    }

    pub fn failing(error: PositionError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl PositionProvider for FixedPositionProvider {
    fn current_position(&self) -> Result<Coordinate, PositionError> {
        self.outcome.clone()
    }
}
