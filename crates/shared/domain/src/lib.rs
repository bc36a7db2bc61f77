//! # Domain Models
//!
//! This crate contains the pure domain types of the reference registry: identifiers,
//! entity families and the immutable geodetic objects the registry builds.
//! Keep it lean: no I/O and no resolution logic, just data and derived values.
//!
//! Objects reference their dependencies through [`std::sync::Arc`], so two objects that
//! depend on the same `(authority, code)` hold the very same instance.

pub mod config;
pub mod family;
pub mod identity;
pub mod model;

pub use family::{Family, FamilySet};
pub use identity::{Authority, IdentifiedObject, Identity, ReferenceKey};
pub use model::*;
