use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::converters::Units;
use crate::diagnostics::Diagnostics;
use crate::error::ReferenceError;
use crate::index::{IndexSpec, RowIndex};
use crate::options::MalformedRowPolicy;
use georef_dataset::{Dataset, Row};
use georef_domain::{CoordinateSystem, CoordinateSystemAxis, CoordinateSystemKind, Family};
use std::sync::Arc;

const KIND: usize = 2;
const DIMENSION: usize = 3;
const REMARKS: usize = 4;

/// Resource holding `code;name;cs_code;orientation;abbreviation;uom_code;order` rows.
pub const AXIS_RESOURCE: &str = "CoordinateAxis";
const AXIS_NAME: usize = 1;
const AXIS_ORIENTATION: usize = 3;
const AXIS_ABBREVIATION: usize = 4;
const AXIS_UNIT: usize = 5;

const AXES: IndexSpec = IndexSpec {
    family: Family::CoordinateSystem,
    resource: AXIS_RESOURCE,
    columns: 7,
    key_column: 2,
    tag: None,
    order_column: Some(6),
};

/// `code;name;kind;dimension;remarks`, plus the ordered axis rows of the system.
///
/// A system without axis rows is kept with no axes; otherwise there must be one axis
/// per dimension.
#[derive(Debug)]
pub struct CoordinateSystemConverter {
    units: Arc<Units>,
    axes: RowIndex,
}

impl CoordinateSystemConverter {
    #[must_use]
    pub fn new(
        dataset: Arc<dyn Dataset>,
        units: Arc<Units>,
        policy: MalformedRowPolicy,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        Self { units, axes: RowIndex::new(dataset, AXES, policy, diagnostics) }
    }

    fn axis(&self, ctx: &mut ConvertContext<'_>, row: &Row) -> Result<CoordinateSystemAxis, ReferenceError> {
        let code = row.code().ok_or_else(|| ctx.malformed_child(AXIS_RESOURCE, row, "non-numeric axis code"))?;
        let name = ctx.child_text(AXIS_RESOURCE, row, AXIS_NAME)?;
        let orientation = ctx.child_text(AXIS_RESOURCE, row, AXIS_ORIENTATION)?;
        let abbreviation = ctx.child_text(AXIS_RESOURCE, row, AXIS_ABBREVIATION)?;
        let unit = ctx.child_text(AXIS_RESOURCE, row, AXIS_UNIT)?;

        Ok(CoordinateSystemAxis {
            code,
            name: name.to_owned(),
            orientation: orientation.to_owned(),
            abbreviation: abbreviation.to_owned(),
            unit: ctx.resolve_value(&self.units, unit)?,
        })
    }
}

impl RowConverter for CoordinateSystemConverter {
    type Output = CoordinateSystem;

    const FAMILY: Family = Family::CoordinateSystem;
    const COLUMNS: usize = 5;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        let identity = ctx.identity(Some(REMARKS))?;
        let kind: CoordinateSystemKind = ctx.parse(KIND)?;
        let dimension: u8 = ctx.parse(DIMENSION)?;
        if !(1..=3).contains(&dimension) {
            return Err(ctx.malformed(format!("dimension must be 1 to 3, got {dimension}")));
        }

        let table = self.axes.table(ctx.authority())?;
        let rows = table.rows(identity.key.code);
        let mut axes = Vec::with_capacity(rows.len());
        for row in rows {
            axes.push(self.axis(ctx, row)?);
        }
        if !axes.is_empty() && axes.len() != usize::from(dimension) {
            return Err(ctx.malformed(format!("{} axes for a {dimension}D system", axes.len())));
        }

        Ok(Some(CoordinateSystem { identity, kind, dimension, axes }))
    }
}
