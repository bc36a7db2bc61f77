use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::converters::Units;
use crate::error::ReferenceError;
use georef_dataset::Row;
use georef_domain::{Ellipsoid, Family};
use std::sync::Arc;

const SEMI_MAJOR_AXIS: usize = 2;
const UNIT: usize = 3;
const INVERSE_FLATTENING: usize = 4;
const SEMI_MINOR_AXIS: usize = 5;
const REMARKS: usize = 6;

/// `code;name;semi_major_axis;uom_code;inverse_flattening;semi_minor_axis;remarks`.
///
/// Exactly one of the inverse flattening and the semi-minor axis must be set.
#[derive(Debug, Clone)]
pub struct EllipsoidConverter {
    units: Arc<Units>,
}

impl EllipsoidConverter {
    #[must_use]
    pub const fn new(units: Arc<Units>) -> Self {
        Self { units }
    }
}

impl RowConverter for EllipsoidConverter {
    type Output = Ellipsoid;

    const FAMILY: Family = Family::Ellipsoid;
    const COLUMNS: usize = 7;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        let identity = ctx.identity(Some(REMARKS))?;
        let a = ctx.float(SEMI_MAJOR_AXIS)?;
        if a <= 0.0 {
            return Err(ctx.malformed(format!("semi-major axis must be positive, got {a}")));
        }
        let shape = (ctx.optional_float(INVERSE_FLATTENING)?, ctx.optional_float(SEMI_MINOR_AXIS)?);
        let unit = ctx.resolve(&self.units, UNIT)?;

        match shape {
            // Zero marks a sphere.
            (Some(inverse_flattening), None) if inverse_flattening != 0.0 && inverse_flattening <= 1.0 => {
                Err(ctx.malformed(format!("inverse flattening must be 0 or greater than 1, got {inverse_flattening}")))
            },
            (Some(inverse_flattening), None) => {
                Ok(Some(Ellipsoid::from_inverse_flattening(identity, a, inverse_flattening, unit)))
            },
            (None, Some(b)) if b <= 0.0 || b > a => {
                Err(ctx.malformed(format!("semi-minor axis must lie in (0, {a}], got {b}")))
            },
            (None, Some(b)) => Ok(Some(Ellipsoid::from_semi_minor_axis(identity, a, b, unit))),
            _ => Err(ctx.malformed("exactly one of inverse flattening and semi-minor axis is required")),
        }
    }
}
