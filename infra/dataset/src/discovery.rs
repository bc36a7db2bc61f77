use crate::namespace::AuthorityNamespace;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Lists the authority directories directly under `root`, upper-cased and sorted.
///
/// Entries that are not directories or whose names are not valid namespaces are ignored.
pub(crate) fn discover_authorities(root: &Path) -> Vec<String> {
    let mut authorities: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?;
            match AuthorityNamespace::try_from(name) {
                Ok(ns) => Some(ns.authority()),
                Err(_) => {
                    debug!(dir = %entry.path().display(), "Skipping non-authority directory");
                    None
                },
            }
        })
        .collect();

    authorities.sort_unstable();
    authorities.dedup();
    authorities
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_only_namespace_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("epsg")).unwrap();
        std::fs::create_dir(tmp.path().join("ignf")).unwrap();
        std::fs::create_dir(tmp.path().join("not valid")).unwrap();
        std::fs::write(tmp.path().join("README.txt"), "x").unwrap();
        std::fs::create_dir_all(tmp.path().join("epsg").join("nested")).unwrap();

        assert_eq!(discover_authorities(tmp.path()), ["EPSG", "IGNF"]);
    }
}
