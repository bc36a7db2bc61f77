use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::error::ReferenceError;
use georef_dataset::Row;
use georef_domain::{Family, UnitKind, UnitOfMeasure};

const KIND: usize = 2;
const FACTOR_B: usize = 3;
const FACTOR_C: usize = 4;
const REMARKS: usize = 5;

/// `code;name;kind;factor_b;factor_c;remarks`, the base-unit factor being `b / c`.
///
/// Both factors blank marks a unit that does not convert linearly.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitOfMeasureConverter;

impl RowConverter for UnitOfMeasureConverter {
    type Output = UnitOfMeasure;

    const FAMILY: Family = Family::UnitOfMeasure;
    const COLUMNS: usize = 6;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        let identity = ctx.identity(Some(REMARKS))?;
        let kind: UnitKind = ctx.parse(KIND)?;

        let factor = match (ctx.optional_float(FACTOR_B)?, ctx.optional_float(FACTOR_C)?) {
            (Some(b), Some(c)) if c != 0.0 => Some(b / c),
            (Some(_), Some(_)) => return Err(ctx.malformed("factor divisor is zero")),
            (None, None) => None,
            _ => return Err(ctx.malformed("factor needs both b and c")),
        };

        Ok(Some(UnitOfMeasure { identity, kind, factor }))
    }
}
