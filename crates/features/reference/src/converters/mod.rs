//! One [`RowConverter`](crate::RowConverter) per concrete family.
//!
//! Converters own `Arc`s to the sibling collections their rows reference, so the
//! dependency graph is fixed when the registry is wired and resolution never goes
//! through a global.

mod area;
mod coordinate_system;
mod crs;
mod datum;
mod ellipsoid;
mod meridian;
mod projection;
mod unit;

pub use area::AreaOfUseConverter;
pub use coordinate_system::{AXIS_RESOURCE, CoordinateSystemConverter};
pub use crs::{GeocentricCrsConverter, GeographicCrsConverter, ProjectedCrsConverter};
pub use datum::GeodeticDatumConverter;
pub use ellipsoid::EllipsoidConverter;
pub use meridian::PrimeMeridianConverter;
pub use projection::{CoordinateProjectionConverter, PARAMETER_VALUE_RESOURCE};
pub use unit::UnitOfMeasureConverter;

use crate::collection::ReferenceCollection;

pub type Units = ReferenceCollection<UnitOfMeasureConverter>;
pub type Areas = ReferenceCollection<AreaOfUseConverter>;
pub type Ellipsoids = ReferenceCollection<EllipsoidConverter>;
pub type PrimeMeridians = ReferenceCollection<PrimeMeridianConverter>;
pub type GeodeticDatums = ReferenceCollection<GeodeticDatumConverter>;
pub type CoordinateSystems = ReferenceCollection<CoordinateSystemConverter>;
pub type CoordinateProjections = ReferenceCollection<CoordinateProjectionConverter>;
pub type GeocentricCrss = ReferenceCollection<GeocentricCrsConverter>;
pub type GeographicCrss = ReferenceCollection<GeographicCrsConverter>;
pub type ProjectedCrss = ReferenceCollection<ProjectedCrsConverter>;
