//! # GeoRef
//!
//! Facade of the reference registry. It wires the collections of `georef-reference`
//! over one dataset into a [`ReferenceContext`] and re-exports the crates a consumer
//! needs. Keep this crate thin: it composes collections, the resolution logic lives in
//! `georef-reference`.
//!
//! ## Usage
//! - Build a context with [`ReferenceContext::from_config`] (directory dataset) or
//!   [`ReferenceContext::builder`] (any [`dataset::Dataset`]).
//! - Share it by cloning; every clone sees the same caches.

mod builder;
mod context;
mod erased;
mod error;
mod object;

pub use builder::{NoDataset, ReferenceContextBuilder, WithDataset};
pub use context::{ReferenceContext, ReferenceContextInner};
pub use error::{ContextError, ContextErrorExt};
pub use georef_dataset as dataset;
pub use georef_domain as domain;
pub use georef_reference as reference;
pub use object::ReferenceObject;
