use crate::context::{ReferenceContext, ReferenceContextInner};
use georef_dataset::Dataset;
use georef_reference::converters::{
    AreaOfUseConverter, CoordinateProjectionConverter, CoordinateSystemConverter, EllipsoidConverter,
    GeocentricCrsConverter, GeodeticDatumConverter, GeographicCrsConverter, PrimeMeridianConverter,
    ProjectedCrsConverter, UnitOfMeasureConverter,
};
use georef_reference::{CollectionOptions, Diagnostics, ReferenceCollection};
use private::Sealed;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct NoDataset;
#[derive(Debug)]
pub struct WithDataset(Arc<dyn Dataset>);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoDataset {}
impl Sealed for WithDataset {}

/// Wires every collection of a [`ReferenceContext`] over one dataset.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct ReferenceContextBuilder<S: Sealed = NoDataset> {
    state: S,
    options: CollectionOptions,
}

#[allow(private_bounds)]
impl<S: Sealed> ReferenceContextBuilder<S> {
    #[must_use = "Sets the options shared by every collection"]
    pub fn options(mut self, options: CollectionOptions) -> Self {
        self.options = options;
        self
    }
}

impl ReferenceContextBuilder<NoDataset> {
    #[must_use = "Creates a new context builder with default options"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the dataset every collection reads"]
    pub fn dataset(self, dataset: Arc<dyn Dataset>) -> ReferenceContextBuilder<WithDataset> {
        ReferenceContextBuilder { state: WithDataset(dataset), options: self.options }
    }
}

impl ReferenceContextBuilder<WithDataset> {
    /// Builds every collection in dependency order. Nothing is read from the dataset yet.
    #[must_use]
    pub fn build(self) -> ReferenceContext {
        let dataset = self.state.0;
        let options = self.options;
        let policy = options.malformed_rows;

        let units = Arc::new(ReferenceCollection::new(Arc::clone(&dataset), UnitOfMeasureConverter, options.clone()));
        let areas = Arc::new(ReferenceCollection::new(Arc::clone(&dataset), AreaOfUseConverter, options.clone()));
        let ellipsoids = Arc::new(ReferenceCollection::new(
            Arc::clone(&dataset),
            EllipsoidConverter::new(Arc::clone(&units)),
            options.clone(),
        ));
        let prime_meridians = Arc::new(ReferenceCollection::new(
            Arc::clone(&dataset),
            PrimeMeridianConverter::new(Arc::clone(&units)),
            options.clone(),
        ));
        let datums = Arc::new(ReferenceCollection::new(
            Arc::clone(&dataset),
            GeodeticDatumConverter::new(Arc::clone(&ellipsoids), Arc::clone(&prime_meridians), Arc::clone(&areas)),
            options.clone(),
        ));

        let axis_diagnostics = Arc::new(Diagnostics::default());
        let coordinate_systems = Arc::new(ReferenceCollection::with_diagnostics(
            Arc::clone(&dataset),
            CoordinateSystemConverter::new(Arc::clone(&dataset), Arc::clone(&units), policy, Arc::clone(&axis_diagnostics)),
            options.clone(),
            axis_diagnostics,
        ));

        let parameter_diagnostics = Arc::new(Diagnostics::default());
        let projections = Arc::new(ReferenceCollection::with_diagnostics(
            Arc::clone(&dataset),
            CoordinateProjectionConverter::new(
                Arc::clone(&dataset),
                Arc::clone(&areas),
                Arc::clone(&units),
                policy,
                Arc::clone(&parameter_diagnostics),
            ),
            options.clone(),
            parameter_diagnostics,
        ));

        let geocentric = Arc::new(ReferenceCollection::new(
            Arc::clone(&dataset),
            GeocentricCrsConverter::new(Arc::clone(&areas), Arc::clone(&coordinate_systems), Arc::clone(&datums)),
            options.clone(),
        ));
        let geographic = Arc::new(ReferenceCollection::new(
            Arc::clone(&dataset),
            GeographicCrsConverter::new(Arc::clone(&areas), Arc::clone(&coordinate_systems), Arc::clone(&datums)),
            options.clone(),
        ));
        let projected = Arc::new(ReferenceCollection::new(
            Arc::clone(&dataset),
            ProjectedCrsConverter::new(
                Arc::clone(&areas),
                Arc::clone(&coordinate_systems),
                Arc::clone(&geographic),
                Arc::clone(&projections),
            ),
            options.clone(),
        ));

        debug!(authority = %options.default_authority, policy = ?policy, "Wired reference collections");

        ReferenceContext {
            inner: Arc::new(ReferenceContextInner {
                dataset,
                options,
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
            }),
        }
    }
}
