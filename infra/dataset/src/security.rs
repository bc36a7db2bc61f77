use crate::error::DatasetError;
use std::path::{Component, Path, PathBuf};

/// Resource names are bare identifiers (`CoordinateReferenceSystem`), never paths.
pub(crate) fn validate_resource(resource: &str) -> Result<(), DatasetError> {
    if !resource.is_empty() && resource.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(DatasetError::PathTraversalAttempt {
            message: resource.to_owned().into(),
            context: Some("Resource name contains illegal characters".into()),
        })
    }
}

/// Collapse `.` / `..` lexically while ensuring the path never climbs above the root.
fn normalize_relative(path: &Path) -> Result<PathBuf, DatasetError> {
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => out.push(seg),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(DatasetError::PathTraversalAttempt {
                        message: path.display().to_string().into(),
                        context: Some("Path attempted to escape dataset root via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(DatasetError::PathTraversalAttempt {
                    message: path.display().to_string().into(),
                    context: Some("Absolute paths are not allowed in a dataset".into()),
                });
            },
        }
    }

    Ok(out)
}

/// Joins a relative resource path to the canonical root and checks that the existing
/// file it names lives inside the root, symlinks included.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, DatasetError> {
    let path = path.as_ref();

    if path.is_absolute() {
        return Err(DatasetError::PathTraversalAttempt {
            message: format!("Absolute paths are not allowed in a dataset {}", path.display()).into(),
            context: None,
        });
    }

    let safe_rel = normalize_relative(path)?;
    let joined = root.join(&safe_rel);

    match joined.canonicalize() {
        Ok(canonical) => validate_canonical(root, canonical),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DatasetError::ResourceNotFound {
            message: safe_rel.display().to_string().into(),
            context: None,
        }),
        Err(e) => Err(DatasetError::Io { source: e, context: Some(joined.display().to_string().into()) }),
    }
}

fn validate_canonical(root: &Path, canonical: PathBuf) -> Result<PathBuf, DatasetError> {
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        Err(DatasetError::PathTraversalAttempt {
            message: canonical.display().to_string().into(),
            context: Some("Resource resolves outside the dataset root".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn collapses_inner_parent_segments() {
        let out = normalize_relative(Path::new("epsg/./x/../Datum.txt")).unwrap();
        assert_eq!(out, Path::new("epsg/Datum.txt"));
    }

    #[test]
    fn rejects_escape_and_absolute() {
        assert!(normalize_relative(Path::new("../etc/passwd")).is_err());
        assert!(normalize_relative(Path::new("epsg/../../etc")).is_err());

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        assert!(matches!(
            resolve_path(&root, "/etc/passwd"),
            Err(DatasetError::PathTraversalAttempt { .. })
        ));
    }

    #[test]
    fn resource_names_are_identifiers() {
        assert!(validate_resource("CoordinateReferenceSystem").is_ok());
        for bad in ["", "../Datum", "epsg/Datum", "Datum.txt", "Da tum"] {
            assert!(validate_resource(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        assert!(matches!(
            resolve_path(&root, "epsg/Nothing.txt"),
            Err(DatasetError::ResourceNotFound { .. })
        ));
    }
}
