mod common;

use common::Registry;
use georef_domain::{CoordinateSystemKind, Family, IdentifiedObject, ReferenceKey};
use georef_reference::ReferenceError;
use std::sync::Arc;

#[test]
fn geocentric_scenario_shares_every_dependency() {
    let registry = Registry::sample();

    let crs = registry.geocentric.lookup("EPSG", 4245).unwrap();

    assert!(Arc::ptr_eq(&crs.area_of_use, &registry.areas.lookup("EPSG", 1262).unwrap()));
    assert!(Arc::ptr_eq(&crs.coordinate_system, &registry.coordinate_systems.lookup("EPSG", 4400).unwrap()));
    assert!(Arc::ptr_eq(&crs.datum, &registry.datums.lookup("EPSG", 6202).unwrap()));
    assert_eq!(crs.scope.as_deref(), Some("Geodesy."));
}

#[test]
fn repeated_lookups_return_the_same_instance() {
    let registry = Registry::sample();

    let first = registry.geographic.lookup("EPSG", 4326).unwrap();
    let second = registry.geographic.lookup("epsg", 4326).unwrap();
    let by_key = registry.geographic.lookup_key(&ReferenceKey::new("EPSG", 4326)).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &by_key));
}

#[test]
fn objects_referencing_one_key_share_it() {
    let registry = Registry::sample();

    let geographic = registry.geographic.lookup("EPSG", 4326).unwrap();
    let geocentric = registry.geocentric.lookup("EPSG", 4978).unwrap();

    assert!(Arc::ptr_eq(&geographic.datum, &geocentric.datum));
    assert!(Arc::ptr_eq(&geographic.datum.ellipsoid.unit, &registry.units.lookup("EPSG", 9001).unwrap()));
}

#[test]
fn missing_code_is_not_found() {
    let registry = Registry::sample();

    let err = registry.geocentric.lookup("EPSG", 999_999).unwrap_err();

    assert!(matches!(
        &err,
        ReferenceError::NotFound { family: Family::GeocentricCrs, key } if *key == ReferenceKey::new("EPSG", 999_999)
    ));
    assert!(!registry.geocentric.contains("EPSG", 999_999).unwrap());
    assert!(registry.geocentric.contains("EPSG", 4245).unwrap());
}

#[test]
fn unknown_authority_is_not_found() {
    let registry = Registry::sample();
    assert!(registry.units.lookup("IGNF", 9001).unwrap_err().is_not_found());
    assert_eq!(registry.units.all_in("IGNF").unwrap().count(), 0);
}

#[test]
fn other_discriminators_read_as_absent() {
    let registry = Registry::sample();

    assert!(registry.geographic.lookup("EPSG", 4326).is_ok());
    assert!(registry.geocentric.lookup("EPSG", 4326).unwrap_err().is_not_found());
    assert!(registry.projected.lookup("EPSG", 4326).unwrap_err().is_not_found());
    assert!(registry.datums.lookup("EPSG", 5101).unwrap_err().is_not_found());
    assert!(registry.projections.lookup("EPSG", 1314).unwrap_err().is_not_found());
    assert!(registry.geocentric.lookup("EPSG", 5701).unwrap_err().is_not_found());
    assert!(registry.geographic.lookup("EPSG", 5701).unwrap_err().is_not_found());
    assert!(registry.projected.lookup("EPSG", 5701).unwrap_err().is_not_found());
}

#[test]
fn aliases_follow_the_alias_resource() {
    let registry = Registry::sample();

    let wgs84 = registry.ellipsoids.lookup("EPSG", 7030).unwrap();
    let airy = registry.ellipsoids.lookup("EPSG", 7001).unwrap();
    let datum = registry.datums.lookup("EPSG", 6326).unwrap();

    assert_eq!(wgs84.aliases(), ["WGS84", "World Geodetic System 1984 ellipsoid"]);
    assert!(airy.aliases().is_empty());
    assert_eq!(datum.aliases(), ["WGS84"]);
}

#[test]
fn projected_systems_expose_their_projection_inputs() {
    let registry = Registry::sample();

    let bng = registry.projected.lookup("EPSG", 27700).unwrap();

    assert!(Arc::ptr_eq(&bng.base, &registry.geographic.lookup("EPSG", 4277).unwrap()));
    assert!(Arc::ptr_eq(&bng.projection, &registry.projections.lookup("EPSG", 19916).unwrap()));
    assert_eq!(bng.projection.method, "Transverse Mercator");

    let names: Vec<&str> = bng.projection.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Latitude of natural origin",
            "Longitude of natural origin",
            "Scale factor at natural origin",
            "False easting",
            "False northing",
        ]
    );
    let false_easting = bng.projection.parameter("false easting").unwrap();
    assert!((false_easting.value - 400_000.0).abs() < f64::EPSILON);
    assert!(Arc::ptr_eq(false_easting.unit.as_ref().unwrap(), &registry.units.lookup("EPSG", 9001).unwrap()));

    let inputs = bng.projection_inputs();
    assert!(Arc::ptr_eq(&inputs.ellipsoid, &registry.ellipsoids.lookup("EPSG", 7001).unwrap()));
    assert!((inputs.ellipsoid.inverse_flattening.unwrap() - 299.324_964_6).abs() < 1e-4);
    assert!(Arc::ptr_eq(&inputs.area_of_use, &bng.area_of_use));
}

#[test]
fn coordinate_system_axes_are_ordered() {
    let registry = Registry::sample();

    let cs = registry.coordinate_systems.lookup("EPSG", 4400).unwrap();
    let geocentric = registry.coordinate_systems.lookup("EPSG", 6500).unwrap();

    assert_eq!(cs.kind, CoordinateSystemKind::Cartesian);
    let abbreviations: Vec<&str> = cs.axes.iter().map(|a| a.abbreviation.as_str()).collect();
    assert_eq!(abbreviations, ["E", "N"]);
    assert!(Arc::ptr_eq(&cs.axis("n").unwrap().unit, &registry.units.lookup("EPSG", 9001).unwrap()));
    assert!(geocentric.axes.is_empty());
    assert_eq!(geocentric.dimension, 3);
}

#[test]
fn units_carry_base_factors() {
    let registry = Registry::sample();

    let degree = registry.units.lookup("EPSG", 9102).unwrap();
    let dms = registry.units.lookup("EPSG", 9110).unwrap();

    assert!((degree.to_base(180.0).unwrap() - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(dms.factor, None);
    assert_eq!(dms.remarks(), Some("Pseudo unit."));
}

#[test]
fn names_and_aliases_resolve_to_the_cached_instance() {
    let registry = Registry::sample();

    let by_alias = registry.ellipsoids.lookup_by_name("wgs84").unwrap();
    let by_name = registry.projected.lookup_by_name("  osgb36 / british national grid ").unwrap();
    let by_crs_alias = registry.projected.lookup_by_name("British National Grid").unwrap();

    assert!(Arc::ptr_eq(&by_alias, &registry.ellipsoids.lookup("EPSG", 7030).unwrap()));
    assert!(Arc::ptr_eq(&by_name, &by_crs_alias));
    assert_eq!(registry.areas.lookup_by_name("EARTH").unwrap().code(), 1262);
    assert!(matches!(
        registry.areas.lookup_by_name("Atlantis"),
        Err(ReferenceError::NameNotFound { family: Family::AreaOfUse, .. })
    ));
}

#[test]
fn shared_names_resolve_per_subtype() {
    let registry = Registry::sample();

    assert_eq!(registry.geographic.lookup_by_name("WGS 84").unwrap().code(), 4326);
    assert_eq!(registry.geocentric.lookup_by_name("WGS 84").unwrap().code(), 4978);
    assert!(registry.projected.lookup_by_name("WGS 84").is_err());
}

#[test]
fn lowest_code_wins_a_shared_name() {
    let dataset = common::builder()
        .resource("EPSG", "AreaOfUse", "200;Shared;;;;;\n100;Shared;;;;;\n300;shared;;;;;\n")
        .build();
    let registry = Registry::new(Arc::new(dataset), georef_reference::CollectionOptions::default());

    for _ in 0..3 {
        assert_eq!(registry.areas.lookup_by_name("Shared").unwrap().code(), 100);
    }
}

#[test]
fn all_walks_the_family_in_dataset_order() {
    let registry = Registry::sample();

    let geographic: Vec<i32> = registry.geographic.all().unwrap().map(|crs| crs.unwrap().code()).collect();
    let geocentric: Vec<i32> = registry.geocentric.all().unwrap().map(|crs| crs.unwrap().code()).collect();

    assert_eq!(geographic, [4326, 4277]);
    assert_eq!(geocentric, [4245, 4978]);
    assert_eq!(registry.geographic.cached_len(), 2);

    let cached = registry.geographic.lookup("EPSG", 4277).unwrap();
    let again = registry.geographic.all().unwrap().nth(1).unwrap().unwrap();
    assert!(Arc::ptr_eq(&cached, &again));
}

#[test]
fn lookups_are_lazy() {
    let registry = Registry::sample();

    registry.ellipsoids.lookup("EPSG", 7030).unwrap();

    assert_eq!(registry.ellipsoids.cached_len(), 1);
    assert_eq!(registry.units.cached_len(), 1);
    assert_eq!(registry.datums.cached_len(), 0);
    assert_eq!(registry.areas.cached_len(), 0);
}
