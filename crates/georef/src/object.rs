use georef_domain::{
    AreaOfUse, CoordinateProjection, CoordinateReferenceSystem, CoordinateSystem, Ellipsoid, Family, GeocentricCrs,
    GeodeticDatum, GeographicCrs, IdentifiedObject, Identity, PrimeMeridian, ProjectedCrs, UnitOfMeasure,
};
use serde::Serialize;
use std::sync::Arc;

/// Any object the registry serves, for callers choosing the family at run time.
///
/// Serialises as the object itself; CRS objects carry their `kind` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReferenceObject {
    UnitOfMeasure(Arc<UnitOfMeasure>),
    AreaOfUse(Arc<AreaOfUse>),
    Ellipsoid(Arc<Ellipsoid>),
    PrimeMeridian(Arc<PrimeMeridian>),
    GeodeticDatum(Arc<GeodeticDatum>),
    CoordinateSystem(Arc<CoordinateSystem>),
    CoordinateProjection(Arc<CoordinateProjection>),
    Crs(CoordinateReferenceSystem),
}

impl ReferenceObject {
    /// The concrete family; CRS objects report their subtype.
    #[must_use]
    pub const fn family(&self) -> Family {
        match self {
            Self::UnitOfMeasure(_) => Family::UnitOfMeasure,
            Self::AreaOfUse(_) => Family::AreaOfUse,
            Self::Ellipsoid(_) => Family::Ellipsoid,
            Self::PrimeMeridian(_) => Family::PrimeMeridian,
            Self::GeodeticDatum(_) => Family::GeodeticDatum,
            Self::CoordinateSystem(_) => Family::CoordinateSystem,
            Self::CoordinateProjection(_) => Family::CoordinateProjection,
            Self::Crs(crs) => crs.family(),
        }
    }
}

impl IdentifiedObject for ReferenceObject {
    fn identity(&self) -> &Identity {
        match self {
            Self::UnitOfMeasure(object) => object.identity(),
            Self::AreaOfUse(object) => object.identity(),
            Self::Ellipsoid(object) => object.identity(),
            Self::PrimeMeridian(object) => object.identity(),
            Self::GeodeticDatum(object) => object.identity(),
            Self::CoordinateSystem(object) => object.identity(),
            Self::CoordinateProjection(object) => object.identity(),
            Self::Crs(crs) => crs.identity(),
        }
    }
}

macro_rules! from_arc {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<Arc<$ty>> for ReferenceObject {
                fn from(object: Arc<$ty>) -> Self {
                    Self::$variant(object)
                }
            }
        )+
    };
}

from_arc!(
    UnitOfMeasure => UnitOfMeasure,
    AreaOfUse => AreaOfUse,
    Ellipsoid => Ellipsoid,
    PrimeMeridian => PrimeMeridian,
    GeodeticDatum => GeodeticDatum,
    CoordinateSystem => CoordinateSystem,
    CoordinateProjection => CoordinateProjection,
);

impl From<CoordinateReferenceSystem> for ReferenceObject {
    fn from(crs: CoordinateReferenceSystem) -> Self {
        Self::Crs(crs)
    }
}

impl From<Arc<GeocentricCrs>> for ReferenceObject {
    fn from(crs: Arc<GeocentricCrs>) -> Self {
        Self::Crs(crs.into())
    }
}

impl From<Arc<GeographicCrs>> for ReferenceObject {
    fn from(crs: Arc<GeographicCrs>) -> Self {
        Self::Crs(crs.into())
    }
}

impl From<Arc<ProjectedCrs>> for ReferenceObject {
    fn from(crs: Arc<ProjectedCrs>) -> Self {
        Self::Crs(crs.into())
    }
}
