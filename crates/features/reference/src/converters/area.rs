use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::error::ReferenceError;
use georef_dataset::Row;
use georef_domain::{AreaOfUse, Family, GeographicBounds};

const SOUTH: usize = 2;
const WEST: usize = 3;
const NORTH: usize = 4;
const EAST: usize = 5;
const REMARKS: usize = 6;

/// `code;name;south;west;north;east;remarks`; the four bounds are all set or all blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaOfUseConverter;

impl RowConverter for AreaOfUseConverter {
    type Output = AreaOfUse;

    const FAMILY: Family = Family::AreaOfUse;
    const COLUMNS: usize = 7;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        let identity = ctx.identity(Some(REMARKS))?;

        let bounds = match (
            ctx.optional_float(SOUTH)?,
            ctx.optional_float(WEST)?,
            ctx.optional_float(NORTH)?,
            ctx.optional_float(EAST)?,
        ) {
            (None, None, None, None) => None,
            (Some(south), Some(west), Some(north), Some(east)) => {
                let latitudes = -90.0..=90.0;
                if !latitudes.contains(&south) || !latitudes.contains(&north) || south > north {
                    return Err(ctx.malformed(format!("invalid latitude range {south}..{north}")));
                }
                let longitudes = -180.0..=180.0;
                if !longitudes.contains(&west) || !longitudes.contains(&east) {
                    return Err(ctx.malformed(format!("invalid longitude range {west}..{east}")));
                }
                Some(GeographicBounds { south, west, north, east })
            },
            _ => return Err(ctx.malformed("bounds must be all set or all blank")),
        };

        Ok(Some(AreaOfUse { identity, bounds }))
    }
}
