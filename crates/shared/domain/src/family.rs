use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every collection the registry exposes.
///
/// Concrete families map onto one dataset resource each; several families may share a
/// resource and are told apart by a discriminator column.
/// [`Family::CoordinateReferenceSystem`] is the union of the three CRS subtypes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    #[strum(to_string = "unit-of-measure", serialize = "unit", serialize = "uom")]
    UnitOfMeasure,
    #[strum(to_string = "area-of-use", serialize = "area")]
    AreaOfUse,
    Ellipsoid,
    PrimeMeridian,
    #[strum(to_string = "geodetic-datum", serialize = "datum")]
    GeodeticDatum,
    #[strum(to_string = "coordinate-system", serialize = "cs")]
    CoordinateSystem,
    #[strum(to_string = "coordinate-projection", serialize = "projection")]
    CoordinateProjection,
    GeocentricCrs,
    GeographicCrs,
    ProjectedCrs,
    #[strum(to_string = "coordinate-reference-system", serialize = "crs")]
    CoordinateReferenceSystem,
}

impl Family {
    /// Families backed by their own collection, in dependency order.
    pub const CONCRETE: [Self; 10] = [
        Self::UnitOfMeasure,
        Self::AreaOfUse,
        Self::Ellipsoid,
        Self::PrimeMeridian,
        Self::GeodeticDatum,
        Self::CoordinateSystem,
        Self::CoordinateProjection,
        Self::GeocentricCrs,
        Self::GeographicCrs,
        Self::ProjectedCrs,
    ];

    /// Name of the dataset resource holding this family's rows.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::UnitOfMeasure => "UnitOfMeasure",
            Self::AreaOfUse => "AreaOfUse",
            Self::Ellipsoid => "Ellipsoid",
            Self::PrimeMeridian => "PrimeMeridian",
            Self::GeodeticDatum => "Datum",
            Self::CoordinateSystem => "CoordinateSystem",
            Self::CoordinateProjection => "CoordinateOperation",
            Self::GeocentricCrs
            | Self::GeographicCrs
            | Self::ProjectedCrs
            | Self::CoordinateReferenceSystem => "CoordinateReferenceSystem",
        }
    }

    /// Tag of this family's rows in the alias resource.
    #[must_use]
    pub const fn alias_tag(self) -> &'static str {
        match self {
            Self::UnitOfMeasure => "Unit of Measure",
            Self::AreaOfUse => "Area",
            Self::Ellipsoid => "Ellipsoid",
            Self::PrimeMeridian => "Prime Meridian",
            Self::GeodeticDatum => "Datum",
            Self::CoordinateSystem => "Coordinate System",
            Self::CoordinateProjection => "Coordinate_Operation",
            Self::GeocentricCrs
            | Self::GeographicCrs
            | Self::ProjectedCrs
            | Self::CoordinateReferenceSystem => "Coordinate Reference System",
        }
    }

    #[must_use]
    pub const fn is_crs(self) -> bool {
        matches!(
            self,
            Self::GeocentricCrs | Self::GeographicCrs | Self::ProjectedCrs | Self::CoordinateReferenceSystem
        )
    }

    /// The single-bit set of this family; the union family maps to [`FamilySet::CRS`].
    #[must_use]
    pub const fn flag(self) -> FamilySet {
        match self {
            Self::UnitOfMeasure => FamilySet::UNIT_OF_MEASURE,
            Self::AreaOfUse => FamilySet::AREA_OF_USE,
            Self::Ellipsoid => FamilySet::ELLIPSOID,
            Self::PrimeMeridian => FamilySet::PRIME_MERIDIAN,
            Self::GeodeticDatum => FamilySet::GEODETIC_DATUM,
            Self::CoordinateSystem => FamilySet::COORDINATE_SYSTEM,
            Self::CoordinateProjection => FamilySet::COORDINATE_PROJECTION,
            Self::GeocentricCrs => FamilySet::GEOCENTRIC_CRS,
            Self::GeographicCrs => FamilySet::GEOGRAPHIC_CRS,
            Self::ProjectedCrs => FamilySet::PROJECTED_CRS,
            Self::CoordinateReferenceSystem => FamilySet::CRS,
        }
    }
}

bitflags! {
    /// Represents a set of families, e.g. the ones to warm up at start.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FamilySet: u32 {
        const UNIT_OF_MEASURE = 1 << 0;
        const AREA_OF_USE = 1 << 1;
        const ELLIPSOID = 1 << 2;
        const PRIME_MERIDIAN = 1 << 3;
        const GEODETIC_DATUM = 1 << 4;
        const COORDINATE_SYSTEM = 1 << 5;
        const COORDINATE_PROJECTION = 1 << 6;
        const GEOCENTRIC_CRS = 1 << 7;
        const GEOGRAPHIC_CRS = 1 << 8;
        const PROJECTED_CRS = 1 << 9;

        const CRS = Self::GEOCENTRIC_CRS.bits() | Self::GEOGRAPHIC_CRS.bits() | Self::PROJECTED_CRS.bits();
        const ALL = (1 << 10) - 1;
    }
}

impl FamilySet {
    /// The concrete families in this set, in dependency order.
    pub fn families(self) -> impl Iterator<Item = Family> {
        Family::CONCRETE.into_iter().filter(move |f| self.contains(f.flag()))
    }
}

impl From<Family> for FamilySet {
    fn from(family: Family) -> Self {
        family.flag()
    }
}

impl FromIterator<Family> for FamilySet {
    fn from_iter<I: IntoIterator<Item = Family>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, f| set | f.flag())
    }
}

impl From<&str> for FamilySet {
    fn from(s: &str) -> Self {
        match s.trim() {
            "all" | "*" => Self::ALL,
            other => other.parse::<Family>().map_or_else(|_| Self::empty(), Family::flag),
        }
    }
}

impl From<u32> for FamilySet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for FamilySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for FamilySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_display() {
        for family in Family::iter() {
            assert_eq!(family.to_string().parse::<Family>().ok(), Some(family));
        }
        assert_eq!("CRS".parse::<Family>().ok(), Some(Family::CoordinateReferenceSystem));
        assert_eq!("datum".parse::<Family>().ok(), Some(Family::GeodeticDatum));
        assert_eq!(Family::GeographicCrs.to_string(), "geographic-crs");
    }

    #[test]
    fn crs_subtypes_share_one_resource() {
        assert_eq!(Family::GeocentricCrs.resource(), Family::ProjectedCrs.resource());
        assert_eq!(Family::GeodeticDatum.resource(), "Datum");
        assert!(Family::ProjectedCrs.is_crs());
        assert!(!Family::Ellipsoid.is_crs());
    }

    #[test]
    fn sets_expand_to_concrete_families() {
        let set = FamilySet::from("crs");
        assert_eq!(
            set.families().collect::<Vec<_>>(),
            [Family::GeocentricCrs, Family::GeographicCrs, Family::ProjectedCrs]
        );
        assert_eq!(FamilySet::from("*").families().count(), Family::CONCRETE.len());
        assert!(FamilySet::from("nonsense").is_empty());
    }

    #[test]
    fn collects_from_families() {
        let set: FamilySet = [Family::Ellipsoid, Family::AreaOfUse].into_iter().collect();
        assert_eq!(set, FamilySet::ELLIPSOID | FamilySet::AREA_OF_USE);
    }
}
