//! Filesystem-backed dataset: one directory per authority, one file per resource.

use crate::builder::DirectoryDatasetBuilder;
use crate::compression::Compression;
use crate::error::{DatasetError, DatasetErrorExt};
use crate::namespace::AuthorityNamespace;
use crate::row::Rows;
use crate::security;
use crate::source::Dataset;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// The shared state of a [`DirectoryDataset`].
#[derive(Debug)]
pub struct DirectoryDatasetInner {
    /// Canonical physical root; every resolved resource must live below it.
    pub(crate) root: PathBuf,
    pub(crate) compression: Compression,
    pub(crate) delimiter: char,
    /// Upper-case authority names discovered at open.
    pub(crate) authorities: Vec<String>,
    /// Decoded resource texts keyed by relative path, stored once each.
    pub(crate) contents: RwLock<FxHashMap<String, Arc<str>>>,
}

/// A thread-safe, read-only dataset rooted at a directory.
///
/// Layout: `<root>/<authority lower-case>/<Resource>.txt` (`.txt.lz4` when opened with
/// [`Compression::Lz4`]). Cloning is cheap; clones share the loaded file contents.
///
/// ```rust
/// use georef_dataset::{Dataset, DirectoryDataset};
///
/// # let tmp = tempfile::tempdir().unwrap();
/// # std::fs::create_dir(tmp.path().join("epsg")).unwrap();
/// # std::fs::write(tmp.path().join("epsg").join("Ellipsoid.txt"), "7030;WGS 84;6378137;9001;298.257223563;;\n").unwrap();
/// let dataset = DirectoryDataset::builder().root(tmp.path()).open()?;
/// assert!(dataset.has_authority("EPSG"));
///
/// let row = dataset.rows("EPSG", "Ellipsoid")?.next().unwrap();
/// assert_eq!(row.get(1), Some("WGS 84"));
/// # Ok::<(), georef_dataset::DatasetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryDataset {
    pub(crate) inner: Arc<DirectoryDatasetInner>,
}

impl Deref for DirectoryDataset {
    type Target = DirectoryDatasetInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DirectoryDataset {
    #[must_use = "The dataset is not opened until you call .open()"]
    pub fn builder() -> DirectoryDatasetBuilder {
        DirectoryDatasetBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Resolves the physical path of `resource` within `authority`.
    ///
    /// # Errors
    /// [`DatasetError::PathTraversalAttempt`] for illegal names or escaping paths,
    /// [`DatasetError::ResourceNotFound`] when the file does not exist.
    pub fn resolve(&self, authority: &str, resource: &str) -> Result<PathBuf, DatasetError> {
        let ns = AuthorityNamespace::try_from(authority)?;
        security::validate_resource(resource)?;
        security::resolve_path(&self.root, Self::relative_path(&ns, &self.compression.file_name(resource)))
    }

    fn relative_path(ns: &AuthorityNamespace, file_name: &str) -> PathBuf {
        Path::new(ns.directory()).join(file_name)
    }

    fn load(&self, ns: &AuthorityNamespace, resource: &str) -> Result<Arc<str>, DatasetError> {
        let relative = Self::relative_path(ns, &self.compression.file_name(resource));
        let key = relative.display().to_string();

        if let Some(text) = self.contents.read().get(&key) {
            return Ok(Arc::clone(text));
        }

        // Read and decode unlocked; racing loaders of one resource keep the first text stored.
        let path = security::resolve_path(&self.root, &relative)?;
        let raw = std::fs::read(&path).context(format!("Failed to read {}", path.display()))?;
        let text: Arc<str> = Arc::from(self.compression.decode(raw).context(key.clone())?);
        debug!(resource = %key, bytes = text.len(), "Loaded dataset resource");

        Ok(Arc::clone(self.contents.write().entry(key).or_insert(text)))
    }
}

impl Dataset for DirectoryDataset {
    fn rows(&self, authority: &str, resource: &str) -> Result<Rows, DatasetError> {
        let ns = AuthorityNamespace::try_from(authority)?;
        security::validate_resource(resource)?;
        let text = self.load(&ns, resource)?;
        Ok(Rows::new(text, self.delimiter))
    }

    fn authorities(&self) -> Vec<String> {
        self.authorities.clone()
    }

    fn has_authority(&self, authority: &str) -> bool {
        let authority = authority.trim();
        self.authorities.iter().any(|a| a.eq_ignore_ascii_case(authority))
    }
}
