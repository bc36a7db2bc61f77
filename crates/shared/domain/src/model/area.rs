use crate::identity::{Identity, identified};
use serde::Serialize;

/// A latitude/longitude bounding box in decimal degrees.
///
/// `west > east` describes a box crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeographicBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeographicBounds {
    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        if latitude < self.south || latitude > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            longitude >= self.west || longitude <= self.east
        } else {
            (self.west..=self.east).contains(&longitude)
        }
    }
}

/// The extent within which a reference object is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaOfUse {
    #[serde(flatten)]
    pub identity: Identity,
    /// `None` when the dataset carries no extent for this area.
    pub bounds: Option<GeographicBounds>,
}

identified!(AreaOfUse);
