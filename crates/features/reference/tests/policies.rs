mod common;

use georef_dataset::MemoryDataset;
use georef_domain::{Family, IdentifiedObject};
use georef_reference::converters::{AreaOfUseConverter, EllipsoidConverter, UnitOfMeasureConverter};
use georef_reference::{CollectionOptions, MalformedRowPolicy, ReferenceCollection, ReferenceError};
use std::sync::Arc;

const ELLIPSOIDS: &str = "\
7030;WGS 84;6378137;9001;298.257223563;;
7001;Broken;not-a-number;9001;;6356256.909;
xyz;Bad code;1;9001;1;;
7003;Short row
7019;GRS 1980;6378137;9001;298.257222101;;
";

fn ellipsoids(policy: MalformedRowPolicy) -> ReferenceCollection<EllipsoidConverter> {
    ellipsoids_from(ELLIPSOIDS, policy)
}

fn ellipsoids_from(rows: &str, policy: MalformedRowPolicy) -> ReferenceCollection<EllipsoidConverter> {
    let dataset = Arc::new(
        MemoryDataset::builder()
            .resource("EPSG", "UnitOfMeasure", common::UNITS)
            .resource("EPSG", "Ellipsoid", rows)
            .build(),
    );
    let options = CollectionOptions::default().with_malformed_rows(policy);
    let units = Arc::new(ReferenceCollection::new(dataset.clone(), UnitOfMeasureConverter, options.clone()));
    ReferenceCollection::new(dataset, EllipsoidConverter::new(units), options)
}

#[test]
fn skip_passes_over_unrelated_rows() {
    let ellipsoids = ellipsoids(MalformedRowPolicy::Skip);

    assert_eq!(ellipsoids.lookup("EPSG", 7019).unwrap().code(), 7019);

    let diagnostics = ellipsoids.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line, 3);
    assert_eq!(diagnostics[0].family, Family::Ellipsoid);
}

#[test]
fn the_requested_row_always_surfaces() {
    let ellipsoids = ellipsoids(MalformedRowPolicy::Skip);

    assert!(matches!(ellipsoids.lookup("EPSG", 7001), Err(ReferenceError::MalformedRecord { line: 2, .. })));
    let Err(ReferenceError::MalformedRecord { line, message, .. }) = ellipsoids.lookup("EPSG", 7003) else {
        panic!("short row must be malformed");
    };
    assert_eq!(line, 4);
    assert_eq!(message, "expected 7 columns, found 2");
    assert!(ellipsoids.contains("EPSG", 7003).is_err());
}

#[test]
fn skip_listing_records_every_bad_row_once() {
    let ellipsoids = ellipsoids(MalformedRowPolicy::Skip);

    let codes: Vec<i32> = ellipsoids.all().unwrap().map(|e| e.unwrap().code()).collect();
    let again = ellipsoids.all().unwrap().count();

    assert_eq!(codes, [7030, 7019]);
    assert_eq!(again, 2);
    let lines: Vec<usize> = ellipsoids.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, [2, 3, 4]);
}

#[test]
fn abort_fails_on_the_first_bad_row() {
    let ellipsoids = ellipsoids(MalformedRowPolicy::Abort);

    assert!(ellipsoids.lookup("EPSG", 7030).is_ok());
    assert!(matches!(ellipsoids.lookup("EPSG", 7019), Err(ReferenceError::MalformedRecord { line: 3, .. })));

    let mut all = ellipsoids.all().unwrap();
    assert_eq!(all.next().unwrap().unwrap().code(), 7030);
    assert!(matches!(all.next(), Some(Err(ReferenceError::MalformedRecord { line: 2, .. }))));
    assert!(ellipsoids.diagnostics().is_empty());
}

#[test]
fn missing_resource_fails_every_lookup() {
    let dataset = Arc::new(MemoryDataset::builder().resource("EPSG", "UnitOfMeasure", common::UNITS).build());
    let units = Arc::new(ReferenceCollection::new(dataset.clone(), UnitOfMeasureConverter, CollectionOptions::default()));
    let ellipsoids = ReferenceCollection::new(dataset, EllipsoidConverter::new(units), CollectionOptions::default());

    assert!(matches!(ellipsoids.lookup("EPSG", 7030), Err(ReferenceError::ResourceNotFound { .. })));
    assert!(ellipsoids.contains("EPSG", 7030).is_err());
    assert!(ellipsoids.all().is_err());
}

#[test]
fn name_lookup_surfaces_the_lowest_malformed_match() {
    let dataset = Arc::new(
        MemoryDataset::builder()
            .resource("EPSG", "AreaOfUse", "100;Shared;-90\n200;Shared;-90;-180;90;180;\n")
            .build(),
    );
    let areas = ReferenceCollection::new(dataset, AreaOfUseConverter, CollectionOptions::default());

    let Err(ReferenceError::MalformedRecord { line, .. }) = areas.lookup_by_name("shared") else {
        panic!("the lowest-coded match is malformed");
    };
    assert_eq!(line, 1);
    assert_eq!(areas.lookup("EPSG", 200).unwrap().code(), 200);
    assert!(areas.lookup_by_name("shared").is_err());
}

#[test]
fn non_finite_numbers_are_malformed() {
    let ellipsoids = ellipsoids_from(
        "\
7030;NaN axis;NaN;9001;298.257223563;;
7001;Infinite flattening;6377563.396;9001;inf;;
7019;Infinite minor axis;6378137;9001;;-infinity;
7059;WGS 84;6378137;9001;298.257223563;;
",
        MalformedRowPolicy::Skip,
    );

    for (code, line) in [(7030, 1), (7001, 2), (7019, 3)] {
        let Err(ReferenceError::MalformedRecord { line: found, message, .. }) = ellipsoids.lookup("EPSG", code) else {
            panic!("ellipsoid {code} must be malformed");
        };
        assert_eq!(found, line);
        assert!(message.contains("non-finite"), "{message}");
    }
    assert_eq!(ellipsoids.all().unwrap().map(|e| e.unwrap().code()).collect::<Vec<_>>(), [7059]);
}

#[test]
fn ellipsoid_shape_must_be_oblate() {
    let ellipsoids = ellipsoids_from(
        "\
7001;Minor exceeds major;6377563.396;9001;;6400000;
7003;Negative minor;6378160;9001;;-1;
7019;Flattening below one;6378137;9001;0.5;;
7030;Negative flattening;6378137;9001;-298.25;;
7059;Sphere;6371000;9001;0;;
7060;Sphere by axes;6371000;9001;;6371000;
",
        MalformedRowPolicy::Skip,
    );

    for code in [7001, 7003, 7019, 7030] {
        assert!(
            matches!(ellipsoids.lookup("EPSG", code), Err(ReferenceError::MalformedRecord { .. })),
            "ellipsoid {code} must be malformed"
        );
    }
    assert_eq!(ellipsoids.lookup("EPSG", 7059).unwrap().code(), 7059);
    assert_eq!(ellipsoids.lookup("EPSG", 7060).unwrap().code(), 7060);
}
