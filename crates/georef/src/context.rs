use crate::builder::ReferenceContextBuilder;
use crate::erased::FamilyCollection;
use crate::error::{ContextError, ContextErrorExt};
use crate::object::ReferenceObject;
use fxhash::FxHashSet;
use georef_dataset::{Compression, Dataset, DirectoryDataset};
use georef_domain::config::{DatasetCompression, ReferenceConfig};
use georef_domain::{Authority, CoordinateReferenceSystem, Family, FamilySet, IdentifiedObject, ProjectionInputs, ReferenceKey};
use georef_reference::converters::{
    Areas, CoordinateProjections, CoordinateSystems, Ellipsoids, GeocentricCrss, GeodeticDatums, GeographicCrss,
    PrimeMeridians, ProjectedCrss, Units,
};
use georef_reference::{CollectionOptions, Diagnostic, ReferenceError};
use std::ops::Deref;
use std::sync::Arc;
use tracing::{info, instrument};

/// Every collection of one registry, wired over one dataset.
///
/// The collection handles are public; each serves `lookup`, `lookup_by_name`,
/// `contains` and `all` for its family.
#[derive(Debug)]
pub struct ReferenceContextInner {
    pub(crate) dataset: Arc<dyn Dataset>,
    pub(crate) options: CollectionOptions,
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

/// The shared reference registry.
///
/// Cloning is cheap and every clone observes the same caches, so one context is built
/// at start-up and handed to every consumer that needs reference objects.
///
/// ```rust
/// use georef::ReferenceContext;
/// use georef::dataset::MemoryDataset;
/// use std::sync::Arc;
///
/// let dataset = MemoryDataset::builder()
///     .resource("EPSG", "UnitOfMeasure", "9001;metre;length;1;1;")
///     .resource("EPSG", "Ellipsoid", "7030;WGS 84;6378137;9001;298.257223563;;")
///     .build();
/// let context = ReferenceContext::builder().dataset(Arc::new(dataset)).build();
///
/// let wgs84 = context.ellipsoids.lookup("EPSG", 7030)?;
/// assert!((wgs84.semi_minor_axis - 6_356_752.314_245).abs() < 1e-3);
/// # Ok::<(), georef::reference::ReferenceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceContext {
    pub(crate) inner: Arc<ReferenceContextInner>,
}

impl Deref for ReferenceContext {
    type Target = ReferenceContextInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ReferenceContext {
    #[must_use]
    pub fn builder() -> ReferenceContextBuilder {
        ReferenceContextBuilder::new()
    }

    /// Opens the configured directory dataset and wires a context over it, then warms the
    /// families listed in `registry.warm`.
    ///
    /// # Errors
    /// [`ContextError::Dataset`] when the dataset root cannot be opened and
    /// [`ContextError::Reference`] when warming a family fails.
    pub fn from_config(config: &ReferenceConfig) -> Result<Self, ContextError> {
        let compression = match config.dataset.compression {
            DatasetCompression::None => Compression::None,
            DatasetCompression::Lz4 => Compression::Lz4,
        };
        let dataset = DirectoryDataset::builder()
            .root(&config.dataset.root)
            .compression(compression)
            .delimiter(config.dataset.delimiter)
            .open()
            .context(format!("Opening dataset root {}", config.dataset.root.display()))?;

        let context = Self::builder()
            .dataset(Arc::new(dataset))
            .options(CollectionOptions::from(&config.registry))
            .build();

        let warm = config.registry.warm_set();
        if !warm.is_empty() {
            context.warm(warm).context("Warming configured families")?;
        }
        Ok(context)
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<dyn Dataset> {
        &self.dataset
    }

    #[must_use]
    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// The CRS with `code`, whatever its subtype.
    ///
    /// # Errors
    /// [`ReferenceError::NotFound`] for [`Family::CoordinateReferenceSystem`] when no
    /// subtype has the key; any other lookup failure as is.
    pub fn crs(&self, authority: &str, code: i32) -> Result<CoordinateReferenceSystem, ReferenceError> {
        self.crs_key(&ReferenceKey::new(authority, code))
    }

    /// Like [`ReferenceContext::crs`], keyed by a [`ReferenceKey`].
    #[instrument(level = "debug", skip_all, fields(%key))]
    pub fn crs_key(&self, key: &ReferenceKey) -> Result<CoordinateReferenceSystem, ReferenceError> {
        if let Some(crs) = present(self.geographic.lookup_key(key))? {
            return Ok(crs.into());
        }
        if let Some(crs) = present(self.projected.lookup_key(key))? {
            return Ok(crs.into());
        }
        if let Some(crs) = present(self.geocentric.lookup_key(key))? {
            return Ok(crs.into());
        }
        Err(ReferenceError::NotFound { family: Family::CoordinateReferenceSystem, key: key.clone() })
    }

    /// The CRS named `name` in the default authority, whatever its subtype.
    ///
    /// # Errors
    /// See [`ReferenceContext::crs_by_name_in`].
    pub fn crs_by_name(&self, name: &str) -> Result<CoordinateReferenceSystem, ReferenceError> {
        self.crs_by_name_in(self.options.default_authority.as_str(), name)
    }

    /// The CRS whose name or alias is `name`; the lowest code among all subtypes wins.
    ///
    /// # Errors
    /// [`ReferenceError::NameNotFound`] when no subtype matches; other failures as is.
    pub fn crs_by_name_in(&self, authority: &str, name: &str) -> Result<CoordinateReferenceSystem, ReferenceError> {
        let mut matches: Vec<CoordinateReferenceSystem> = Vec::with_capacity(3);
        if let Some(crs) = named(self.geographic.lookup_by_name_in(authority, name))? {
            matches.push(crs.into());
        }
        if let Some(crs) = named(self.projected.lookup_by_name_in(authority, name))? {
            matches.push(crs.into());
        }
        if let Some(crs) = named(self.geocentric.lookup_by_name_in(authority, name))? {
            matches.push(crs.into());
        }

        matches.into_iter().min_by_key(IdentifiedObject::code).ok_or_else(|| ReferenceError::NameNotFound {
            family: Family::CoordinateReferenceSystem,
            authority: Authority::new(authority),
            name: name.trim().to_owned(),
        })
    }

    /// What a coordinate-transformation component needs for a projected CRS.
    ///
    /// # Errors
    /// As [`georef_reference::ReferenceCollection::lookup`] on the projected collection.
    pub fn projection_inputs(&self, authority: &str, code: i32) -> Result<ProjectionInputs, ReferenceError> {
        self.projected.lookup(authority, code).map(|crs| crs.projection_inputs())
    }

    /// Looks up an object of a family chosen at run time.
    ///
    /// # Errors
    /// As the family's `lookup`; [`ReferenceContext::crs`] for the CRS union.
    pub fn lookup(&self, family: Family, authority: &str, code: i32) -> Result<ReferenceObject, ReferenceError> {
        match self.collection(family) {
            Some(collection) => collection.lookup(authority, code),
            None => self.crs(authority, code).map(Into::into),
        }
    }

    /// Looks up an object by name in the default authority, for a family chosen at run time.
    ///
    /// # Errors
    /// As the family's `lookup_by_name`; [`ReferenceContext::crs_by_name`] for the CRS union.
    pub fn lookup_by_name(&self, family: Family, name: &str) -> Result<ReferenceObject, ReferenceError> {
        let authority = &self.options.default_authority;
        match self.collection(family) {
            Some(collection) => collection.lookup_by_name(authority, name),
            None => self.crs_by_name_in(authority.as_str(), name).map(Into::into),
        }
    }

    /// Every object of a family in `authority`; the CRS union is ordered by code.
    ///
    /// # Errors
    /// Dataset failures and, under [`georef_reference::MalformedRowPolicy::Abort`],
    /// malformed rows.
    pub fn list(&self, family: Family, authority: &str) -> Result<Vec<ReferenceObject>, ReferenceError> {
        let authority = Authority::new(authority);
        if let Some(collection) = self.collection(family) {
            return collection.list(&authority);
        }

        let mut objects = Vec::new();
        for subtype in FamilySet::CRS.families() {
            if let Some(collection) = self.collection(subtype) {
                objects.extend(collection.list(&authority)?);
            }
        }
        objects.sort_by_key(IdentifiedObject::code);
        Ok(objects)
    }

    /// Fully loads the selected families in the default authority and returns how many
    /// objects they hold.
    ///
    /// # Errors
    /// The first failure met while listing a family.
    pub fn warm(&self, families: FamilySet) -> Result<usize, ReferenceError> {
        let authority = &self.options.default_authority;
        let mut total = 0;
        for family in families.families() {
            let Some(collection) = self.collection(family) else { continue };
            let count = collection.list(authority)?.len();
            info!(%family, %authority, count, "Warmed reference family");
            total += count;
        }
        info!(total, "Reference warm-up complete");
        Ok(total)
    }

    /// Malformed rows skipped so far across every collection, one entry per row.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut seen = FxHashSet::default();
        Family::CONCRETE
            .into_iter()
            .filter_map(|family| self.collection(family))
            .flat_map(|collection| collection.diagnostics())
            .filter(|diagnostic| seen.insert((diagnostic.authority.clone(), diagnostic.resource.clone(), diagnostic.line)))
            .collect()
    }

    /// The collection of a concrete family; `None` for the CRS union.
    fn collection(&self, family: Family) -> Option<&dyn FamilyCollection> {
        let collection: &dyn FamilyCollection = match family {
            Family::UnitOfMeasure => &*self.units,
            Family::AreaOfUse => &*self.areas,
            Family::Ellipsoid => &*self.ellipsoids,
            Family::PrimeMeridian => &*self.prime_meridians,
            Family::GeodeticDatum => &*self.datums,
            Family::CoordinateSystem => &*self.coordinate_systems,
            Family::CoordinateProjection => &*self.projections,
            Family::GeocentricCrs => &*self.geocentric,
            Family::GeographicCrs => &*self.geographic,
            Family::ProjectedCrs => &*self.projected,
            Family::CoordinateReferenceSystem => return None,
        };
        Some(collection)
    }
}

/// `None` for a key the subtype does not have.
fn present<T>(result: Result<Arc<T>, ReferenceError>) -> Result<Option<Arc<T>>, ReferenceError> {
    match result {
        Ok(object) => Ok(Some(object)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// `None` for a name the subtype does not have.
fn named<T>(result: Result<Arc<T>, ReferenceError>) -> Result<Option<Arc<T>>, ReferenceError> {
    match result {
        Ok(object) => Ok(Some(object)),
        Err(ReferenceError::NameNotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
