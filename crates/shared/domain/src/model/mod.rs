//! Immutable geodetic objects built by the registry.

mod area;
mod coordinate_system;
mod crs;
mod datum;
mod ellipsoid;
mod meridian;
mod projection;
mod unit;

pub use area::{AreaOfUse, GeographicBounds};
pub use coordinate_system::{CoordinateSystem, CoordinateSystemAxis, CoordinateSystemKind};
pub use crs::{CoordinateReferenceSystem, GeocentricCrs, GeographicCrs, ProjectedCrs, ProjectionInputs};
pub use datum::GeodeticDatum;
pub use ellipsoid::Ellipsoid;
pub use meridian::PrimeMeridian;
pub use projection::{CoordinateProjection, OperationParameterValue};
pub use unit::{UnitKind, UnitOfMeasure};
