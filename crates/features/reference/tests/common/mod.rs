#![allow(dead_code)]

use fxhash::FxHashMap;
use georef_dataset::{Dataset, DatasetError, MemoryDataset, MemoryDatasetBuilder, Rows};
use georef_reference::converters::{
    AreaOfUseConverter, Areas, CoordinateProjectionConverter, CoordinateProjections, CoordinateSystemConverter,
    CoordinateSystems, EllipsoidConverter, Ellipsoids, GeocentricCrsConverter, GeocentricCrss, GeodeticDatumConverter,
    GeodeticDatums, GeographicCrsConverter, GeographicCrss, PrimeMeridianConverter, PrimeMeridians,
    ProjectedCrsConverter, ProjectedCrss, UnitOfMeasureConverter, Units,
};
use georef_reference::{CollectionOptions, Diagnostics, ReferenceCollection};
use parking_lot::Mutex;
use std::sync::Arc;

pub const UNITS: &str = "\
9001;metre;length;1;1;
9102;degree;angle;3.14159265358979;180;
9110;sexagesimal DMS;angle;;;Pseudo unit.
9201;unity;scale;1;1;
";

pub const AREAS: &str = "\
1262;World;-90;-180;90;180;
1264;UK - Great Britain;49.75;-9.01;61.01;2.01;
1279;Australia - onshore;-43.7;112.85;-9.86;153.69;
";

pub const ELLIPSOIDS: &str = "\
7030;WGS 84;6378137;9001;298.257223563;;
7001;Airy 1830;6377563.396;9001;;6356256.909;
7003;Australian National Spheroid;6378160;9001;298.25;;
";

pub const PRIME_MERIDIANS: &str = "8901;Greenwich;0;9102;\n";

pub const DATUMS: &str = "\
6326;World Geodetic System 1984;geodetic;7030;8901;1262;;
6202;Australian Geodetic Datum 1966;geodetic;7003;8901;1279;Johnston Memorial Cairn.;
6277;Ordnance Survey of Great Britain 1936;geodetic;7001;8901;1264;;
5101;Ordnance Datum Newlyn;vertical;;;1264;Mean Sea Level at Newlyn.;
";

pub const COORDINATE_SYSTEMS: &str = "\
4400;Cartesian 2D CS;cartesian;2;
6422;Ellipsoidal 2D CS;ellipsoidal;2;
6500;Earth centred, earth fixed;cartesian;3;
";

pub const AXES: &str = "\
2;Northing;4400;north;N;9001;2
1;Easting;4400;east;E;9001;1
106;Geodetic latitude;6422;north;Lat;9102;1
107;Geodetic longitude;6422;east;Lon;9102;2
";

pub const OPERATIONS: &str = "\
19916;British National Grid;conversion;Transverse Mercator;1264;
1314;OSGB36 to WGS 84 (6);transformation;Position Vector;1264;
";

pub const PARAMETER_VALUES: &str = "\
19916;False northing;-100000;9001;5
19916;Latitude of natural origin;49;9102;1
19916;Longitude of natural origin;-2;9102;2
19916;Scale factor at natural origin;0.9996012717;9201;3
19916;False easting;400000;9001;4
";

pub const CRS: &str = "\
4245;Scenario geocentric;1262;geocentric;4400;6202;;;Geodesy.;
4326;WGS 84;1262;geographic 2D;6422;6326;;;Horizontal component of 3D system.;
4978;WGS 84;1262;geocentric;6500;6326;;;Geodesy.;
4277;OSGB36;1264;geographic 2D;6422;6277;;;Geodesy.;
27700;OSGB36 / British National Grid;1264;projected;4400;;4277;19916;Topographic mapping.;
5701;ODN height;1264;vertical;6499;5101;;;Geodesy.;
";

pub const ALIASES: &str = "\
Ellipsoid;7030;WGS84
Ellipsoid;7030;World Geodetic System 1984 ellipsoid
Datum;6326;WGS84
Coordinate Reference System;27700;British National Grid
Unit of Measure;9001;meter
Area;1262;Earth
";

/// The sample dataset, in the `EPSG` authority.
pub fn builder() -> MemoryDatasetBuilder {
    MemoryDataset::builder()
        .resource("EPSG", "UnitOfMeasure", UNITS)
        .resource("EPSG", "AreaOfUse", AREAS)
        .resource("EPSG", "Ellipsoid", ELLIPSOIDS)
        .resource("EPSG", "PrimeMeridian", PRIME_MERIDIANS)
        .resource("EPSG", "Datum", DATUMS)
        .resource("EPSG", "CoordinateSystem", COORDINATE_SYSTEMS)
        .resource("EPSG", "CoordinateAxis", AXES)
        .resource("EPSG", "CoordinateOperation", OPERATIONS)
        .resource("EPSG", "CoordinateOperationParameterValue", PARAMETER_VALUES)
        .resource("EPSG", "CoordinateReferenceSystem", CRS)
        .resource("EPSG", "Alias", ALIASES)
}

pub fn dataset() -> Arc<dyn Dataset> {
    Arc::new(builder().build())
}

/// Every collection, wired the way an application would.
#[derive(Debug)]
pub struct Registry {
    pub units: Arc<Units>,
    pub areas: Arc<Areas>,
    pub ellipsoids: Arc<Ellipsoids>,
    pub prime_meridians: Arc<PrimeMeridians>,
    pub datums: Arc<GeodeticDatums>,
    pub coordinate_systems: Arc<CoordinateSystems>,
    pub projections: Arc<CoordinateProjections>,
    pub geocentric: Arc<GeocentricCrss>,
    pub geographic: Arc<GeographicCrss>,
    pub projected: Arc<ProjectedCrss>,
}

impl Registry {
    pub fn new(dataset: Arc<dyn Dataset>, options: CollectionOptions) -> Self {
        let d = || Arc::clone(&dataset);
        let o = || options.clone();
        let policy = options.malformed_rows;

        let units = Arc::new(ReferenceCollection::new(d(), UnitOfMeasureConverter, o()));
        let areas = Arc::new(ReferenceCollection::new(d(), AreaOfUseConverter, o()));
        let ellipsoids = Arc::new(ReferenceCollection::new(d(), EllipsoidConverter::new(Arc::clone(&units)), o()));
        let prime_meridians =
            Arc::new(ReferenceCollection::new(d(), PrimeMeridianConverter::new(Arc::clone(&units)), o()));
        let datums = Arc::new(ReferenceCollection::new(
            d(),
            GeodeticDatumConverter::new(Arc::clone(&ellipsoids), Arc::clone(&prime_meridians), Arc::clone(&areas)),
            o(),
        ));

        let cs_diagnostics = Arc::new(Diagnostics::default());
        let coordinate_systems = Arc::new(ReferenceCollection::with_diagnostics(
            d(),
            CoordinateSystemConverter::new(d(), Arc::clone(&units), policy, Arc::clone(&cs_diagnostics)),
            o(),
            cs_diagnostics,
        ));

        let projection_diagnostics = Arc::new(Diagnostics::default());
        let projections = Arc::new(ReferenceCollection::with_diagnostics(
            d(),
            CoordinateProjectionConverter::new(
                d(),
                Arc::clone(&areas),
                Arc::clone(&units),
                policy,
                Arc::clone(&projection_diagnostics),
            ),
            o(),
            projection_diagnostics,
        ));

        let geocentric = Arc::new(ReferenceCollection::new(
            d(),
            GeocentricCrsConverter::new(Arc::clone(&areas), Arc::clone(&coordinate_systems), Arc::clone(&datums)),
            o(),
        ));
        let geographic = Arc::new(ReferenceCollection::new(
            d(),
            GeographicCrsConverter::new(Arc::clone(&areas), Arc::clone(&coordinate_systems), Arc::clone(&datums)),
            o(),
        ));
        let projected = Arc::new(ReferenceCollection::new(
            d(),
            ProjectedCrsConverter::new(
                Arc::clone(&areas),
                Arc::clone(&coordinate_systems),
                Arc::clone(&geographic),
                Arc::clone(&projections),
            ),
            o(),
        ));

        Self {
            units,
            areas,
            ellipsoids,
            prime_meridians,
            datums,
            coordinate_systems,
            projections,
            geocentric,
            geographic,
            projected,
        }
    }

    pub fn sample() -> Self {
        Self::new(dataset(), CollectionOptions::default())
    }
}

/// Counts how often each resource is opened.
#[derive(Debug)]
pub struct CountingDataset {
    inner: MemoryDataset,
    opened: Mutex<FxHashMap<String, usize>>,
}

impl CountingDataset {
    pub fn new(inner: MemoryDataset) -> Self {
        Self { inner, opened: Mutex::default() }
    }

    pub fn opened(&self, resource: &str) -> usize {
        self.opened.lock().get(resource).copied().unwrap_or_default()
    }
}

impl Dataset for CountingDataset {
    fn rows(&self, authority: &str, resource: &str) -> Result<Rows, DatasetError> {
        *self.opened.lock().entry(resource.to_owned()).or_default() += 1;
        self.inner.rows(authority, resource)
    }

    fn authorities(&self) -> Vec<String> {
        self.inner.authorities()
    }
}
