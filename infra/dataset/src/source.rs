use crate::error::DatasetError;
use crate::row::Rows;
use std::fmt::Debug;
use std::sync::Arc;

/// A read-only source of delimited rows, partitioned by authority and resource name.
///
/// Implementations must be cheap to query repeatedly: every call to [`Dataset::rows`]
/// rescans from the start of the resource.
pub trait Dataset: Debug + Send + Sync {
    /// Returns a fresh cursor over the rows of `resource` within `authority`.
    ///
    /// # Errors
    /// [`DatasetError::ResourceNotFound`] when the authority or the resource does not exist,
    /// other variants when the backing storage cannot be read.
    fn rows(&self, authority: &str, resource: &str) -> Result<Rows, DatasetError>;

    /// Upper-case names of every authority the dataset carries, sorted.
    fn authorities(&self) -> Vec<String>;

    fn has_authority(&self, authority: &str) -> bool {
        let authority = authority.trim();
        self.authorities().iter().any(|a| a.eq_ignore_ascii_case(authority))
    }
}

impl<D: Dataset + ?Sized> Dataset for Arc<D> {
    fn rows(&self, authority: &str, resource: &str) -> Result<Rows, DatasetError> {
        (**self).rows(authority, resource)
    }

    fn authorities(&self) -> Vec<String> {
        (**self).authorities()
    }

    fn has_authority(&self, authority: &str) -> bool {
        (**self).has_authority(authority)
    }
}
