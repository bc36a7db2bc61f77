//! The three CRS subtypes, which share the `CoordinateReferenceSystem` resource:
//! `code;name;area_code;kind;cs_code;datum_code;base_crs_code;projection_code;scope;remarks`.

use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::converters::{Areas, CoordinateProjections, CoordinateSystems, GeodeticDatums, GeographicCrss};
use crate::error::ReferenceError;
use georef_dataset::Row;
use georef_domain::{AreaOfUse, CoordinateSystem, Family, GeocentricCrs, GeographicCrs, Identity, ProjectedCrs};
use std::sync::Arc;

const COLUMNS: usize = 10;
const AREA: usize = 2;
const KIND: usize = 3;
const COORDINATE_SYSTEM: usize = 4;
const DATUM: usize = 5;
const BASE_CRS: usize = 6;
const PROJECTION: usize = 7;
const SCOPE: usize = 8;
const REMARKS: usize = 9;

const GEOCENTRIC: &str = "geocentric";
const GEOGRAPHIC_2D: &str = "geographic 2D";
const GEOGRAPHIC_3D: &str = "geographic 3D";
const PROJECTED: &str = "projected";

/// Columns every CRS subtype carries.
struct Common {
    identity: Identity,
    scope: Option<String>,
    area_of_use: Arc<AreaOfUse>,
    coordinate_system: Arc<CoordinateSystem>,
}

fn common(
    ctx: &mut ConvertContext<'_>,
    areas: &Areas,
    coordinate_systems: &CoordinateSystems,
) -> Result<Common, ReferenceError> {
    Ok(Common {
        identity: ctx.identity(Some(REMARKS))?,
        scope: ctx.optional_text(SCOPE),
        area_of_use: ctx.resolve(areas, AREA)?,
        coordinate_system: ctx.resolve(coordinate_systems, COORDINATE_SYSTEM)?,
    })
}

/// Rows of kind `geocentric`.
#[derive(Debug, Clone)]
pub struct GeocentricCrsConverter {
    areas: Arc<Areas>,
    coordinate_systems: Arc<CoordinateSystems>,
    datums: Arc<GeodeticDatums>,
}

impl GeocentricCrsConverter {
    #[must_use]
    pub const fn new(
        areas: Arc<Areas>,
        coordinate_systems: Arc<CoordinateSystems>,
        datums: Arc<GeodeticDatums>,
    ) -> Self {
        Self { areas, coordinate_systems, datums }
    }
}

impl RowConverter for GeocentricCrsConverter {
    type Output = GeocentricCrs;

    const FAMILY: Family = Family::GeocentricCrs;
    const COLUMNS: usize = COLUMNS;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        if !ctx.is_kind(KIND, &[GEOCENTRIC]) {
            return Ok(None);
        }

        let Common { identity, scope, area_of_use, coordinate_system } =
            common(ctx, &self.areas, &self.coordinate_systems)?;
        let datum = ctx.resolve(&self.datums, DATUM)?;

        Ok(Some(GeocentricCrs { identity, scope, area_of_use, coordinate_system, datum }))
    }
}

/// Rows of kind `geographic 2D` and `geographic 3D`.
#[derive(Debug, Clone)]
pub struct GeographicCrsConverter {
    areas: Arc<Areas>,
    coordinate_systems: Arc<CoordinateSystems>,
    datums: Arc<GeodeticDatums>,
}

impl GeographicCrsConverter {
    #[must_use]
    pub const fn new(
        areas: Arc<Areas>,
        coordinate_systems: Arc<CoordinateSystems>,
        datums: Arc<GeodeticDatums>,
    ) -> Self {
        Self { areas, coordinate_systems, datums }
    }
}

impl RowConverter for GeographicCrsConverter {
    type Output = GeographicCrs;

    const FAMILY: Family = Family::GeographicCrs;
    const COLUMNS: usize = COLUMNS;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        let dimension = if ctx.is_kind(KIND, &[GEOGRAPHIC_2D]) {
            2
        } else if ctx.is_kind(KIND, &[GEOGRAPHIC_3D]) {
            3
        } else {
            return Ok(None);
        };

        let Common { identity, scope, area_of_use, coordinate_system } =
            common(ctx, &self.areas, &self.coordinate_systems)?;
        let datum = ctx.resolve(&self.datums, DATUM)?;

        Ok(Some(GeographicCrs { identity, scope, dimension, area_of_use, coordinate_system, datum }))
    }
}

/// Rows of kind `projected`: a geographic base system plus a projection.
#[derive(Debug, Clone)]
pub struct ProjectedCrsConverter {
    areas: Arc<Areas>,
    coordinate_systems: Arc<CoordinateSystems>,
    geographic: Arc<GeographicCrss>,
    projections: Arc<CoordinateProjections>,
}

impl ProjectedCrsConverter {
    #[must_use]
    pub const fn new(
        areas: Arc<Areas>,
        coordinate_systems: Arc<CoordinateSystems>,
        geographic: Arc<GeographicCrss>,
        projections: Arc<CoordinateProjections>,
    ) -> Self {
        Self { areas, coordinate_systems, geographic, projections }
    }
}

impl RowConverter for ProjectedCrsConverter {
    type Output = ProjectedCrs;

    const FAMILY: Family = Family::ProjectedCrs;
    const COLUMNS: usize = COLUMNS;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        if !ctx.is_kind(KIND, &[PROJECTED]) {
            return Ok(None);
        }

        let Common { identity, scope, area_of_use, coordinate_system } =
            common(ctx, &self.areas, &self.coordinate_systems)?;
        let base = ctx.resolve(&self.geographic, BASE_CRS)?;
        let projection = ctx.resolve(&self.projections, PROJECTION)?;

        Ok(Some(ProjectedCrs { identity, scope, area_of_use, coordinate_system, base, projection }))
    }
}
