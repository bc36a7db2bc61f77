use crate::identity::{Identity, identified};
use crate::model::{AreaOfUse, UnitOfMeasure};
use serde::Serialize;
use std::sync::Arc;

/// One named parameter of a projection, in parameter order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationParameterValue {
    pub name: String,
    pub value: f64,
    /// `None` for unitless parameters.
    pub unit: Option<Arc<UnitOfMeasure>>,
}

impl OperationParameterValue {
    /// The value in the base unit of its unit kind (radians, metres, unity).
    #[must_use]
    pub fn base_value(&self) -> Option<f64> {
        match &self.unit {
            Some(unit) => unit.to_base(self.value),
            None => Some(self.value),
        }
    }
}

/// A map projection: a method name plus its ordered parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateProjection {
    #[serde(flatten)]
    pub identity: Identity,
    pub method: String,
    pub area_of_use: Arc<AreaOfUse>,
    pub parameters: Vec<OperationParameterValue>,
}

impl CoordinateProjection {
    /// Finds a parameter by name, ignoring ASCII case.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&OperationParameterValue> {
        let name = name.trim();
        self.parameters.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

identified!(CoordinateProjection);
