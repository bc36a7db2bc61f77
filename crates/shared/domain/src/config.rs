use crate::family::{Family, FamilySet};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level registry configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceConfigInner {
    pub dataset: DatasetConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    #[serde(flatten, default)]
    inner: Arc<ReferenceConfigInner>,
}

impl Deref for ReferenceConfig {
    type Target = ReferenceConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ReferenceConfig {
    fn deref_mut(&mut self) -> &mut ReferenceConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// On-disk encoding of dataset files.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetCompression {
    #[default]
    None,
    Lz4,
}

/// Where the reference dataset lives and how its files are encoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub root: PathBuf,
    pub compression: DatasetCompression,
    pub delimiter: char,
}

/// What a collection does with a row it cannot parse.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRowPolicy {
    /// Skip rows unrelated to the requested key, logging and recording a diagnostic.
    #[default]
    Skip,
    /// Fail any operation that meets a malformed row.
    Abort,
}

/// How alias rows are matched to objects.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasScope {
    /// Match by the family's alias tag and code.
    #[default]
    PerFamily,
    /// Match by code alone, whatever the tag.
    Global,
}

/// Collection behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Authority used by name lookups and bare codes.
    pub default_authority: String,
    pub malformed_rows: MalformedRowPolicy,
    pub alias_scope: AliasScope,
    /// Families fully loaded at start-up.
    pub warm: Vec<Family>,
}

impl RegistryConfig {
    #[must_use]
    pub fn warm_set(&self) -> FamilySet {
        self.warm.iter().copied().collect()
    }
}

/// Subscriber settings for binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { root: PathBuf::from("data"), compression: DatasetCompression::None, delimiter: ';' }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_authority: crate::identity::EPSG.to_owned(),
            malformed_rows: MalformedRowPolicy::Skip,
            alias_scope: AliasScope::PerFamily,
            warm: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}
