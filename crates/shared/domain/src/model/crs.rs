use crate::family::Family;
use crate::identity::{IdentifiedObject, Identity, identified};
use crate::model::{AreaOfUse, CoordinateProjection, CoordinateSystem, Ellipsoid, GeodeticDatum, PrimeMeridian};
use serde::Serialize;
use std::sync::Arc;

/// An earth-centred cartesian reference system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocentricCrs {
    #[serde(flatten)]
    pub identity: Identity,
    pub scope: Option<String>,
    pub area_of_use: Arc<AreaOfUse>,
    pub coordinate_system: Arc<CoordinateSystem>,
    pub datum: Arc<GeodeticDatum>,
}

/// A latitude/longitude (and optionally ellipsoidal height) reference system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicCrs {
    #[serde(flatten)]
    pub identity: Identity,
    pub scope: Option<String>,
    /// 2 or 3.
    pub dimension: u8,
    pub area_of_use: Arc<AreaOfUse>,
    pub coordinate_system: Arc<CoordinateSystem>,
    pub datum: Arc<GeodeticDatum>,
}

/// A map grid derived from a geographic base system through a projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedCrs {
    #[serde(flatten)]
    pub identity: Identity,
    pub scope: Option<String>,
    pub area_of_use: Arc<AreaOfUse>,
    pub coordinate_system: Arc<CoordinateSystem>,
    pub base: Arc<GeographicCrs>,
    pub projection: Arc<CoordinateProjection>,
}

impl ProjectedCrs {
    #[must_use]
    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        &self.base.datum
    }

    /// Everything the coordinate-transformation side needs for this grid.
    #[must_use]
    pub fn projection_inputs(&self) -> ProjectionInputs {
        ProjectionInputs {
            ellipsoid: Arc::clone(&self.base.datum.ellipsoid),
            prime_meridian: Arc::clone(&self.base.datum.prime_meridian),
            projection: Arc::clone(&self.projection),
            area_of_use: Arc::clone(&self.area_of_use),
        }
    }
}

identified!(GeocentricCrs, GeographicCrs, ProjectedCrs);

/// Any coordinate reference system the registry builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoordinateReferenceSystem {
    Geocentric(Arc<GeocentricCrs>),
    Geographic(Arc<GeographicCrs>),
    Projected(Arc<ProjectedCrs>),
}

impl CoordinateReferenceSystem {
    #[must_use]
    pub const fn family(&self) -> Family {
        match self {
            Self::Geocentric(_) => Family::GeocentricCrs,
            Self::Geographic(_) => Family::GeographicCrs,
            Self::Projected(_) => Family::ProjectedCrs,
        }
    }

    #[must_use]
    pub fn area_of_use(&self) -> &Arc<AreaOfUse> {
        match self {
            Self::Geocentric(crs) => &crs.area_of_use,
            Self::Geographic(crs) => &crs.area_of_use,
            Self::Projected(crs) => &crs.area_of_use,
        }
    }

    #[must_use]
    pub fn coordinate_system(&self) -> &Arc<CoordinateSystem> {
        match self {
            Self::Geocentric(crs) => &crs.coordinate_system,
            Self::Geographic(crs) => &crs.coordinate_system,
            Self::Projected(crs) => &crs.coordinate_system,
        }
    }

    /// The geodetic datum; for projected systems, the datum of the base system.
    #[must_use]
    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        match self {
            Self::Geocentric(crs) => &crs.datum,
            Self::Geographic(crs) => &crs.datum,
            Self::Projected(crs) => crs.datum(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::Geocentric(crs) => crs.scope.as_deref(),
            Self::Geographic(crs) => crs.scope.as_deref(),
            Self::Projected(crs) => crs.scope.as_deref(),
        }
    }

    #[must_use]
    pub const fn as_geographic(&self) -> Option<&Arc<GeographicCrs>> {
        if let Self::Geographic(crs) = self { Some(crs) } else { None }
    }

    #[must_use]
    pub const fn as_projected(&self) -> Option<&Arc<ProjectedCrs>> {
        if let Self::Projected(crs) = self { Some(crs) } else { None }
    }

    #[must_use]
    pub const fn as_geocentric(&self) -> Option<&Arc<GeocentricCrs>> {
        if let Self::Geocentric(crs) = self { Some(crs) } else { None }
    }
}

impl IdentifiedObject for CoordinateReferenceSystem {
    fn identity(&self) -> &Identity {
        match self {
            Self::Geocentric(crs) => crs.identity(),
            Self::Geographic(crs) => crs.identity(),
            Self::Projected(crs) => crs.identity(),
        }
    }
}

impl From<Arc<GeocentricCrs>> for CoordinateReferenceSystem {
    fn from(crs: Arc<GeocentricCrs>) -> Self {
        Self::Geocentric(crs)
    }
}

impl From<Arc<GeographicCrs>> for CoordinateReferenceSystem {
    fn from(crs: Arc<GeographicCrs>) -> Self {
        Self::Geographic(crs)
    }
}

impl From<Arc<ProjectedCrs>> for CoordinateReferenceSystem {
    fn from(crs: Arc<ProjectedCrs>) -> Self {
        Self::Projected(crs)
    }
}

/// The shared objects a coordinate-transformation component consumes for one projected
/// system: the ellipsoid, the prime meridian, the named parameter set and the area of use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionInputs {
    pub ellipsoid: Arc<Ellipsoid>,
    pub prime_meridian: Arc<PrimeMeridian>,
    pub projection: Arc<CoordinateProjection>,
    pub area_of_use: Arc<AreaOfUse>,
}
