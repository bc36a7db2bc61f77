use crate::error::DatasetError;
use std::fmt;

/// A validated authority namespace, stored lower-case as it appears on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorityNamespace(String);

impl AuthorityNamespace {
    /// The directory name of this authority (`epsg`).
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.0
    }

    /// The canonical authority name (`EPSG`).
    #[must_use]
    pub fn authority(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl TryFrom<&str> for AuthorityNamespace {
    type Error = DatasetError;

    fn try_from(value: &str) -> Result<Self, DatasetError> {
        let name = value.trim().to_ascii_lowercase();

        if name.is_empty() {
            return Err(DatasetError::PathTraversalAttempt {
                message: "EMPTY".into(),
                context: Some("Authority namespace cannot be empty".into()),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DatasetError::PathTraversalAttempt {
                message: name.into(),
                context: Some("Authority namespace contains illegal characters".into()),
            });
        }

        Ok(Self(name))
    }
}

impl TryFrom<String> for AuthorityNamespace {
    type Error = DatasetError;

    fn try_from(value: String) -> Result<Self, DatasetError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for AuthorityNamespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorityNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
