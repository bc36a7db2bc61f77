use crate::error::DatasetError;
use crate::row::{DEFAULT_DELIMITER, Rows};
use crate::source::Dataset;
use fxhash::FxHashMap;
use std::sync::Arc;

/// A dataset served from embedded text, keyed by (authority, resource).
///
/// ```rust
/// use georef_dataset::{Dataset, MemoryDataset};
///
/// let dataset = MemoryDataset::builder()
///     .resource("epsg", "UnitOfMeasure", "9001;metre;length;1;1;")
///     .build();
///
/// assert_eq!(dataset.authorities(), ["EPSG"]);
/// assert_eq!(dataset.rows("EPSG", "UnitOfMeasure").unwrap().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    resources: FxHashMap<(String, String), Arc<str>>,
    delimiter: char,
}

#[derive(Debug, Default)]
pub struct MemoryDatasetBuilder {
    resources: FxHashMap<(String, String), Arc<str>>,
    delimiter: Option<char>,
}

impl MemoryDatasetBuilder {
    /// Adds (or replaces) the text of one resource.
    #[must_use]
    pub fn resource(mut self, authority: &str, resource: &str, text: impl Into<Arc<str>>) -> Self {
        self.resources.insert((normalize(authority), resource.to_owned()), text.into());
        self
    }

    #[must_use]
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    #[must_use]
    pub fn build(self) -> MemoryDataset {
        MemoryDataset {
            resources: self.resources,
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
        }
    }
}

impl MemoryDataset {
    #[must_use]
    pub fn builder() -> MemoryDatasetBuilder {
        MemoryDatasetBuilder::default()
    }
}

impl Dataset for MemoryDataset {
    fn rows(&self, authority: &str, resource: &str) -> Result<Rows, DatasetError> {
        self.resources
            .get(&(normalize(authority), resource.to_owned()))
            .map(|text| Rows::new(Arc::clone(text), self.delimiter))
            .ok_or_else(|| DatasetError::ResourceNotFound {
                message: format!("{}/{resource}", authority.trim()).into(),
                context: Some("No such in-memory resource".into()),
            })
    }

    fn authorities(&self) -> Vec<String> {
        let mut authorities: Vec<String> = self.resources.keys().map(|(a, _)| a.clone()).collect();
        authorities.sort_unstable();
        authorities.dedup();
        authorities
    }
}

fn normalize(authority: &str) -> String {
    authority.trim().to_ascii_uppercase()
}
