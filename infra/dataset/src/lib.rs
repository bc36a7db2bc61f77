//! A sandboxed, read-only row source for authority-coded reference datasets.
//!
//! A dataset is a set of delimited text resources, one per entity family, grouped by
//! authority. Resources are exposed as lazy, restartable [`Rows`] cursors; interpreting
//! the columns is left to the caller.
//!
//! # Core Features
//!
//! - **Sandbox Security**: authority and resource names are validated and every path is
//!   canonicalised and checked against the dataset root.
//! - **Transparent Compression**: optional LZ4 block-compressed resource files.
//! - **Load Once**: each resource file is read and decoded once, then shared by every cursor.
//! - **In-Memory Datasets**: [`MemoryDataset`] serves embedded text behind the same trait.
//!
//! # Examples
//!
//! ```rust
//! use georef_dataset::{Compression, Dataset, DatasetError, DirectoryDataset};
//!
//! # let tmp = tempfile::tempdir().unwrap();
//! # let root = tmp.path();
//! # std::fs::create_dir(root.join("epsg")).unwrap();
//! # std::fs::write(root.join("epsg").join("Alias.txt.lz4"),
//! #     Compression::Lz4.encode("Ellipsoid;7030;WGS84\n")).unwrap();
//! let dataset = DirectoryDataset::builder()
//!     .root(root)
//!     .compression(Compression::Lz4)
//!     .open()?;
//!
//! for row in dataset.rows("EPSG", "Alias")? {
//!     assert_eq!(row.columns(), ["Ellipsoid", "7030", "WGS84"]);
//! }
//!
//! assert!(matches!(dataset.rows("EPSG", "../secrets"), Err(DatasetError::PathTraversalAttempt { .. })));
//! # Ok::<(), DatasetError>(())
//! ```

mod builder;
mod compression;
mod directory;
mod discovery;
mod error;
mod memory;
mod namespace;
mod row;
mod security;
mod source;

pub use builder::DirectoryDatasetBuilder;
pub use compression::Compression;
pub use directory::{DirectoryDataset, DirectoryDatasetInner};
pub use error::{DatasetError, DatasetErrorExt};
pub use memory::{MemoryDataset, MemoryDatasetBuilder};
pub use namespace::AuthorityNamespace;
pub use row::{DEFAULT_DELIMITER, Row, Rows};
pub use source::Dataset;
