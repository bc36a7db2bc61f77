use crate::compression::Compression;
use crate::directory::{DirectoryDataset, DirectoryDatasetInner};
use crate::discovery::discover_authorities;
use crate::error::DatasetError;
use crate::row::DEFAULT_DELIMITER;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
struct DatasetConfig {
    compression: Compression,
    delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { compression: Compression::None, delimiter: DEFAULT_DELIMITER }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct DirectoryDatasetBuilder<S: Sealed = NoRoot> {
    state: S,
    config: DatasetConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> DirectoryDatasetBuilder<S> {
    #[must_use = "Sets the on-disk encoding of resource files"]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    #[must_use = "Sets the column delimiter of resource files"]
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> DirectoryDatasetBuilder<N> {
        DirectoryDatasetBuilder { state, config: self.config }
    }
}

impl DirectoryDatasetBuilder<NoRoot> {
    #[must_use = "Creates a new dataset builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the root directory of the dataset"]
    pub fn root(self, path: impl Into<PathBuf>) -> DirectoryDatasetBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl DirectoryDatasetBuilder<WithRoot> {
    /// Consumes the configuration and opens the dataset.
    ///
    /// The root is resolved to its canonical physical path, so every resource path is
    /// later checked against the real directory rather than a symlink. Authority
    /// directories are discovered once, here; no resource file is read until a
    /// collection first asks for its rows.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DirectoryNotFound`] if the root does not exist or is not
    /// a directory, and [`DatasetError::Io`] if it cannot be resolved.
    pub fn open(self) -> Result<DirectoryDataset, DatasetError> {
        let root = &self.state.0;

        let canonical = match root.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DatasetError::DirectoryNotFound {
                    message: root.display().to_string().into(),
                    context: None,
                });
            },
            Err(e) => {
                return Err(DatasetError::Io {
                    source: e,
                    context: Some(format!("Failed to resolve dataset root: {}", root.display()).into()),
                });
            },
        };

        if !canonical.is_dir() {
            return Err(DatasetError::DirectoryNotFound {
                message: canonical.display().to_string().into(),
                context: Some("Dataset root is not a directory".into()),
            });
        }

        let authorities = discover_authorities(&canonical);
        info!(
            path = %canonical.display(),
            authorities = ?authorities,
            compression = ?self.config.compression,
            "Opened reference dataset"
        );

        Ok(DirectoryDataset {
            inner: Arc::new(DirectoryDatasetInner {
                root: canonical,
                compression: self.config.compression,
                delimiter: self.config.delimiter,
                authorities,
                contents: RwLock::new(FxHashMap::default()),
            }),
        })
    }
}
