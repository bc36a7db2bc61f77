use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::converters::{Areas, Ellipsoids, PrimeMeridians};
use crate::error::ReferenceError;
use georef_dataset::Row;
use georef_domain::{Family, GeodeticDatum};
use std::sync::Arc;

const KIND: usize = 2;
const ELLIPSOID: usize = 3;
const PRIME_MERIDIAN: usize = 4;
const AREA: usize = 5;
const ORIGIN: usize = 6;
const REMARKS: usize = 7;

const GEODETIC: &str = "geodetic";

/// `code;name;kind;ellipsoid_code;prime_meridian_code;area_code;origin;remarks`.
///
/// Vertical and engineering datums share the resource and are not geodetic datums.
#[derive(Debug, Clone)]
pub struct GeodeticDatumConverter {
    ellipsoids: Arc<Ellipsoids>,
    prime_meridians: Arc<PrimeMeridians>,
    areas: Arc<Areas>,
}

impl GeodeticDatumConverter {
    #[must_use]
    pub const fn new(ellipsoids: Arc<Ellipsoids>, prime_meridians: Arc<PrimeMeridians>, areas: Arc<Areas>) -> Self {
        Self { ellipsoids, prime_meridians, areas }
    }
}

impl RowConverter for GeodeticDatumConverter {
    type Output = GeodeticDatum;

    const FAMILY: Family = Family::GeodeticDatum;
    const COLUMNS: usize = 8;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        if !ctx.is_kind(KIND, &[GEODETIC]) {
            return Ok(None);
        }

        let identity = ctx.identity(Some(REMARKS))?;
        let ellipsoid = ctx.resolve(&self.ellipsoids, ELLIPSOID)?;
        let prime_meridian = ctx.resolve(&self.prime_meridians, PRIME_MERIDIAN)?;
        let area_of_use = ctx.resolve(&self.areas, AREA)?;

        Ok(Some(GeodeticDatum { identity, ellipsoid, prime_meridian, area_of_use, origin: ctx.optional_text(ORIGIN) }))
    }
}
