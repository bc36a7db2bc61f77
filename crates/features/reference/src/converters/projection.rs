use crate::collection::RowConverter;
use crate::context::ConvertContext;
use crate::converters::{Areas, Units};
use crate::diagnostics::Diagnostics;
use crate::error::ReferenceError;
use crate::index::{IndexSpec, RowIndex};
use crate::options::MalformedRowPolicy;
use georef_dataset::{Dataset, Row};
use georef_domain::{CoordinateProjection, Family, OperationParameterValue};
use std::sync::Arc;

const KIND: usize = 2;
const METHOD: usize = 3;
const AREA: usize = 4;
const REMARKS: usize = 5;

const CONVERSION: &str = "conversion";

/// Resource holding `operation_code;parameter;value;uom_code;order` rows.
pub const PARAMETER_VALUE_RESOURCE: &str = "CoordinateOperationParameterValue";
const PARAMETER_NAME: usize = 1;
const PARAMETER_VALUE: usize = 2;
const PARAMETER_UNIT: usize = 3;

const PARAMETERS: IndexSpec = IndexSpec {
    family: Family::CoordinateProjection,
    resource: PARAMETER_VALUE_RESOURCE,
    columns: 5,
    key_column: 0,
    tag: None,
    order_column: Some(4),
};

/// `code;name;kind;method;area_code;remarks` rows of kind `conversion`, with their ordered
/// parameter values. Transformations share the resource and are skipped.
#[derive(Debug)]
pub struct CoordinateProjectionConverter {
    areas: Arc<Areas>,
    units: Arc<Units>,
    parameters: RowIndex,
}

impl CoordinateProjectionConverter {
    #[must_use]
    pub fn new(
        dataset: Arc<dyn Dataset>,
        areas: Arc<Areas>,
        units: Arc<Units>,
        policy: MalformedRowPolicy,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        Self { areas, units, parameters: RowIndex::new(dataset, PARAMETERS, policy, diagnostics) }
    }

    fn parameter(&self, ctx: &mut ConvertContext<'_>, row: &Row) -> Result<OperationParameterValue, ReferenceError> {
        let name = ctx.child_text(PARAMETER_VALUE_RESOURCE, row, PARAMETER_NAME)?;
        let raw = ctx.child_text(PARAMETER_VALUE_RESOURCE, row, PARAMETER_VALUE)?;
        let value = raw.parse::<f64>().map_err(|_| {
            ctx.malformed_child(PARAMETER_VALUE_RESOURCE, row, format!("invalid parameter value '{raw}'"))
        })?;
        let unit = match row.get(PARAMETER_UNIT).filter(|u| !u.is_empty()) {
            Some(unit) => Some(ctx.resolve_value(&self.units, unit)?),
            None => None,
        };

        Ok(OperationParameterValue { name: name.to_owned(), value, unit })
    }
}

impl RowConverter for CoordinateProjectionConverter {
    type Output = CoordinateProjection;

    const FAMILY: Family = Family::CoordinateProjection;
    const COLUMNS: usize = 6;

    fn convert(&self, _row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError> {
        if !ctx.is_kind(KIND, &[CONVERSION]) {
            return Ok(None);
        }

        let identity = ctx.identity(Some(REMARKS))?;
        let method = ctx.text(METHOD)?.to_owned();
        let area_of_use = ctx.resolve(&self.areas, AREA)?;

        let table = self.parameters.table(ctx.authority())?;
        let rows = table.rows(identity.key.code);
        let mut parameters = Vec::with_capacity(rows.len());
        for row in rows {
            parameters.push(self.parameter(ctx, row)?);
        }

        Ok(Some(CoordinateProjection { identity, method, area_of_use, parameters }))
    }
}
