use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::converters::Units;
use crate::error::ReferenceError;
use georef_dataset::Row;
use georef_domain::{Family, PrimeMeridian};
use std::sync::Arc;

const LONGITUDE: usize = 2;
const UNIT: usize = 3;
const REMARKS: usize = 4;

/// `code;name;longitude;uom_code;remarks`.
#[derive(Debug, Clone)]
pub struct PrimeMeridianConverter {
    units: Arc<Units>,
}

impl PrimeMeridianConverter {
    #[must_use]
    pub const fn new(units: Arc<Units>) -> Self {
        Self { units }
    }
}

impl RowConverter for PrimeMeridianConverter {
    type Output = PrimeMeridian;

    const FAMILY: Family = Family::PrimeMeridian;
    const COLUMNS: usize = 5;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        let identity = ctx.identity(Some(REMARKS))?;
        let longitude = ctx.float(LONGITUDE)?;
        let unit = ctx.resolve(&self.units, UNIT)?;
        Ok(Some(PrimeMeridian { identity, longitude, unit }))
    }
}
