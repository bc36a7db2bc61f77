use georef_dataset::DatasetError;
use georef_domain::{Authority, Family, ReferenceKey};
use std::borrow::Cow;
use std::sync::Arc;

/// A specialized [`ReferenceError`] enum of this crate.
///
/// Errors are `Clone` so callers coalesced on one cache miss all receive the real error.
#[georef_derive::georef_error]
#[derive(Clone)]
pub enum ReferenceError {
    /// The resource backing a collection is missing; every lookup on it fails.
    #[error("Reference resource not found{}: {message}", format_context(.context))]
    ResourceNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Dataset failure{}: {source}", format_context(.context))]
    Dataset { source: Arc<DatasetError>, context: Option<Cow<'static, str>> },

    /// A row does not have the shape its family requires.
    #[error(
        "Malformed {family} record at {authority}/{resource} line {line}{}: {message}",
        format_context(.context)
    )]
    MalformedRecord {
        family: Family,
        authority: Authority,
        resource: Cow<'static, str>,
        line: usize,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("No {family} object with key {key}")]
    NotFound { family: Family, key: ReferenceKey },

    #[error("No {family} object named '{name}' in {authority}")]
    NameNotFound { family: Family, authority: Authority, name: String },

    /// A foreign key of `origin` names an object that does not exist.
    #[error("{origin_family} {origin} references missing {target_family} {target}")]
    UnresolvedReference {
        origin: ReferenceKey,
        origin_family: Family,
        target: ReferenceKey,
        target_family: Family,
    },

    /// Every in-flight key from the first occurrence of the repeated key to the repeat.
    #[error("Circular reference: {}", format_cycle(.cycle))]
    CircularReference { cycle: Vec<(Family, ReferenceKey)> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal reference error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ReferenceError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

impl From<DatasetError> for ReferenceError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::ResourceNotFound { message, context } => Self::ResourceNotFound { message, context },
            other => Self::Dataset { source: Arc::new(other), context: None },
        }
    }
}

fn format_cycle(cycle: &[(Family, ReferenceKey)]) -> String {
    cycle.iter().map(|(family, key)| format!("{family} {key}")).collect::<Vec<_>>().join(" -> ")
}
