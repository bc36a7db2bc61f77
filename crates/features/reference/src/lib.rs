//! # Reference
//!
//! Lazily resolved, singleton-cached collections of geodetic reference objects.
//!
//! Each family (units, areas, ellipsoids, datums, coordinate systems, projections and
//! the CRS subtypes) is served by one [`ReferenceCollection`], parameterised by the
//! [`RowConverter`] that turns a raw dataset row into a domain object. Converters hold
//! `Arc`s to the sibling collections their rows reference; foreign keys are resolved
//! on demand through [`ConvertContext::resolve`], carrying an explicit [`Resolution`]
//! stack that turns a cyclic dataset into [`ReferenceError::CircularReference`].
//!
//! ```rust
//! use georef_dataset::MemoryDataset;
//! use georef_reference::converters::{EllipsoidConverter, UnitOfMeasureConverter};
//! use georef_reference::{CollectionOptions, ReferenceCollection};
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(
//!     MemoryDataset::builder()
//!         .resource("EPSG", "UnitOfMeasure", "9001;metre;length;1;1;")
//!         .resource("EPSG", "Ellipsoid", "7030;WGS 84;6378137;9001;298.257223563;;")
//!         .build(),
//! );
//! let options = CollectionOptions::default();
//! let units = Arc::new(ReferenceCollection::new(dataset.clone(), UnitOfMeasureConverter, options.clone()));
//! let ellipsoids = ReferenceCollection::new(dataset, EllipsoidConverter::new(Arc::clone(&units)), options);
//!
//! let wgs84 = ellipsoids.lookup("EPSG", 7030)?;
//! assert!(Arc::ptr_eq(&wgs84.unit, &units.lookup("EPSG", 9001)?));
//! # Ok::<(), georef_reference::ReferenceError>(())
//! ```

mod collection;
mod context;
pub mod converters;
mod diagnostics;
mod error;
mod index;
mod options;
mod resolution;

pub use crate::collection::{All, ReferenceCollection, RowConverter};
pub use crate::context::{CODE_COLUMN, ConvertContext, NAME_COLUMN};
pub use crate::diagnostics::{Diagnostic, Diagnostics};
pub use crate::error::{ReferenceError, ReferenceErrorExt};
pub use crate::index::{ALIAS_RESOURCE, AliasIndex, IndexSpec, IndexTable, RowIndex};
pub use crate::options::{AliasScope, CollectionOptions, MalformedRowPolicy};
pub use crate::resolution::Resolution;
