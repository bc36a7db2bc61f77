use crate::identity::{Identity, identified};
use crate::model::UnitOfMeasure;
use serde::Serialize;
use std::sync::Arc;

/// A reference ellipsoid. Axis lengths are expressed in [`Ellipsoid::unit`].
///
/// Datasets carry either the inverse flattening or the semi-minor axis; the other is
/// derived at construction. A sphere has no inverse flattening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ellipsoid {
    #[serde(flatten)]
    pub identity: Identity,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub inverse_flattening: Option<f64>,
    pub unit: Arc<UnitOfMeasure>,
}

impl Ellipsoid {
    #[must_use]
    pub fn from_inverse_flattening(
        identity: Identity,
        semi_major_axis: f64,
        inverse_flattening: f64,
        unit: Arc<UnitOfMeasure>,
    ) -> Self {
        if inverse_flattening == 0.0 || inverse_flattening.is_infinite() {
            return Self::sphere(identity, semi_major_axis, unit);
        }
        Self {
            identity,
            semi_major_axis,
            semi_minor_axis: semi_major_axis * (1.0 - 1.0 / inverse_flattening),
            inverse_flattening: Some(inverse_flattening),
            unit,
        }
    }

    #[must_use]
    pub fn from_semi_minor_axis(
        identity: Identity,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        unit: Arc<UnitOfMeasure>,
    ) -> Self {
        if (semi_major_axis - semi_minor_axis).abs() <= f64::EPSILON * semi_major_axis.abs() {
            return Self::sphere(identity, semi_major_axis, unit);
        }
        Self {
            identity,
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening: Some(semi_major_axis / (semi_major_axis - semi_minor_axis)),
            unit,
        }
    }

    #[must_use]
    pub const fn sphere(identity: Identity, radius: f64, unit: Arc<UnitOfMeasure>) -> Self {
        Self { identity, semi_major_axis: radius, semi_minor_axis: radius, inverse_flattening: None, unit }
    }

    #[must_use]
    pub const fn is_sphere(&self) -> bool {
        self.inverse_flattening.is_none()
    }

    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.inverse_flattening.map_or(0.0, |inv| 1.0 / inv)
    }

    /// First eccentricity squared, `2f - f²`.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f.mul_add(-f, 2.0 * f)
    }
}

identified!(Ellipsoid);
