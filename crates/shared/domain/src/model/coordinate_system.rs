use crate::identity::{Identity, identified};
use crate::model::UnitOfMeasure;
use serde::Serialize;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystemKind {
    Cartesian,
    Ellipsoidal,
    Vertical,
    Spherical,
    Polar,
    Affine,
    Ordinal,
}

/// One axis of a coordinate system, in axis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateSystemAxis {
    pub code: i32,
    pub name: String,
    pub orientation: String,
    pub abbreviation: String,
    pub unit: Arc<UnitOfMeasure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateSystem {
    #[serde(flatten)]
    pub identity: Identity,
    pub kind: CoordinateSystemKind,
    pub dimension: u8,
    pub axes: Vec<CoordinateSystemAxis>,
}

impl CoordinateSystem {
    #[must_use]
    pub fn axis(&self, abbreviation: &str) -> Option<&CoordinateSystemAxis> {
        self.axes.iter().find(|a| a.abbreviation.eq_ignore_ascii_case(abbreviation))
    }
}

identified!(CoordinateSystem);
