use crate::identity::{Identity, identified};
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// The quantity a unit measures; each kind has one base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Base unit: metre.
    Length,
    /// Base unit: radian.
    Angle,
    /// Base unit: unity.
    Scale,
    /// Base unit: second.
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitOfMeasure {
    #[serde(flatten)]
    pub identity: Identity,
    pub kind: UnitKind,
    /// Multiplier to the base unit of [`UnitOfMeasure::kind`]; `None` for units that
    /// are not a plain multiple of it (sexagesimal DMS).
    pub factor: Option<f64>,
}

impl UnitOfMeasure {
    /// Converts `value` in this unit to the base unit of its kind.
    #[must_use]
    pub fn to_base(&self, value: f64) -> Option<f64> {
        self.factor.map(|factor| value * factor)
    }

    /// Converts `value` in the base unit of its kind to this unit.
    #[must_use]
    pub fn from_base(&self, value: f64) -> Option<f64> {
        self.factor.filter(|f| *f != 0.0).map(|factor| value / factor)
    }
}

identified!(UnitOfMeasure);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ReferenceKey;

    fn degree() -> UnitOfMeasure {
        UnitOfMeasure {
            identity: Identity::new(ReferenceKey::new("EPSG", 9102), "degree"),
            kind: UnitKind::Angle,
            factor: Some(std::f64::consts::PI / 180.0),
        }
    }

    #[test]
    fn converts_to_and_from_base() {
        let unit = degree();
        let radians = unit.to_base(180.0).unwrap();
        assert!((radians - std::f64::consts::PI).abs() < 1e-12);
        assert!((unit.from_base(radians).unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn non_linear_units_do_not_convert() {
        let unit = UnitOfMeasure { factor: None, ..degree() };
        assert_eq!(unit.to_base(1.0), None);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Length".parse::<UnitKind>().ok(), Some(UnitKind::Length));
        assert!("volume".parse::<UnitKind>().is_err());
    }
}
