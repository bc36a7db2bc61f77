use crate::identity::{Identity, identified};
use crate::model::UnitOfMeasure;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimeMeridian {
    #[serde(flatten)]
    pub identity: Identity,
    /// Longitude from Greenwich, in [`PrimeMeridian::unit`].
    pub longitude: f64,
    pub unit: Arc<UnitOfMeasure>,
}

impl PrimeMeridian {
    /// Greenwich longitude in radians, when the unit converts linearly.
    #[must_use]
    pub fn longitude_radians(&self) -> Option<f64> {
        self.unit.to_base(self.longitude)
    }
}

identified!(PrimeMeridian);
