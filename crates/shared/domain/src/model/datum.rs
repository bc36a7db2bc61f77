use crate::identity::{Identity, identified};
use crate::model::{AreaOfUse, Ellipsoid, PrimeMeridian};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeodeticDatum {
    #[serde(flatten)]
    pub identity: Identity,
    pub ellipsoid: Arc<Ellipsoid>,
    pub prime_meridian: Arc<PrimeMeridian>,
    pub area_of_use: Arc<AreaOfUse>,
    pub origin: Option<String>,
}

identified!(GeodeticDatum);
