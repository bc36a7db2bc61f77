use georef_dataset::*;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, authority: &str, file: &str, contents: &[u8]) {
    let dir = root.join(authority);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), contents).unwrap();
}

#[test]
fn test_missing_root_is_directory_not_found() {
    let temp = TempDir::new().unwrap();
    let result = DirectoryDataset::builder().root(temp.path().join("absent")).open();
    assert!(matches!(result, Err(DatasetError::DirectoryNotFound { .. })));
}

#[test]
fn test_file_root_is_directory_not_found() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("plain.txt");
    std::fs::write(&file, "x").unwrap();
    let result = DirectoryDataset::builder().root(&file).open();
    assert!(matches!(result, Err(DatasetError::DirectoryNotFound { .. })));
}

#[test]
fn test_rows_are_restartable() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "epsg", "AreaOfUse.txt", b"# code;name\n1262;World;-90;-180;90;180;\n1119;Hungary;45.74;16.11;48.58;22.9;\n");

    let dataset = DirectoryDataset::builder().root(temp.path()).open().unwrap();

    let first: Vec<Row> = dataset.rows("EPSG", "AreaOfUse").unwrap().collect();
    let second: Vec<Row> = dataset.rows("epsg", "AreaOfUse").unwrap().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].line(), 2);
    assert_eq!(first[1].get(1), Some("Hungary"));
}

#[test]
fn test_contents_are_loaded_once() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "epsg", "Ellipsoid.txt", b"7030;WGS 84;6378137;9001;298.257223563;;\n");

    let dataset = DirectoryDataset::builder().root(temp.path()).open().unwrap();
    assert_eq!(dataset.rows("EPSG", "Ellipsoid").unwrap().count(), 1);

    // The file is gone, but the decoded text stays with the dataset.
    std::fs::remove_file(temp.path().join("epsg").join("Ellipsoid.txt")).unwrap();
    assert_eq!(dataset.clone().rows("EPSG", "Ellipsoid").unwrap().count(), 1);
}

#[test]
fn test_missing_resource_and_authority() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "epsg", "Datum.txt", b"");

    let dataset = DirectoryDataset::builder().root(temp.path()).open().unwrap();
    assert_eq!(dataset.rows("EPSG", "Datum").unwrap().count(), 0);
    assert!(matches!(dataset.rows("EPSG", "Ellipsoid"), Err(DatasetError::ResourceNotFound { .. })));
    assert!(matches!(dataset.rows("IGNF", "Datum"), Err(DatasetError::ResourceNotFound { .. })));
    assert!(!dataset.has_authority("IGNF"));
}

#[test]
fn test_path_traversal_blocked() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "epsg", "Datum.txt", b"");
    let dataset = DirectoryDataset::builder().root(temp.path()).open().unwrap();

    assert!(matches!(dataset.rows("../epsg", "Datum"), Err(DatasetError::PathTraversalAttempt { .. })));
    assert!(matches!(dataset.rows("EPSG", "../../etc/passwd"), Err(DatasetError::PathTraversalAttempt { .. })));
    assert!(matches!(dataset.resolve("EPSG", "/etc/passwd"), Err(DatasetError::PathTraversalAttempt { .. })));
}

#[cfg(unix)]
#[test]
fn test_symlink_escape_blocked() {
    let outside = TempDir::new().unwrap();
    std::fs::write(outside.path().join("Datum.txt"), "6326;WGS 84;geodetic;7030;8901;1262;;").unwrap();

    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("epsg")).unwrap();
    std::os::unix::fs::symlink(outside.path().join("Datum.txt"), temp.path().join("epsg").join("Datum.txt"))
        .unwrap();

    let dataset = DirectoryDataset::builder().root(temp.path()).open().unwrap();
    assert!(matches!(dataset.rows("EPSG", "Datum"), Err(DatasetError::PathTraversalAttempt { .. })));
}

#[test]
fn test_lz4_resources() {
    let temp = TempDir::new().unwrap();
    let text = "Ellipsoid;7030;WGS84\nEllipsoid;7030;WGS 1984\n";
    write(temp.path(), "epsg", "Alias.txt.lz4", &Compression::Lz4.encode(text));
    write(temp.path(), "epsg", "Broken.txt.lz4", &[10, 0, 0, 0, 0xF0]);

    let dataset = DirectoryDataset::builder().root(temp.path()).compression(Compression::Lz4).open().unwrap();
    assert_eq!(dataset.compression(), Compression::Lz4);

    let aliases: Vec<String> =
        dataset.rows("EPSG", "Alias").unwrap().filter_map(|r| r.get(2).map(str::to_owned)).collect();
    assert_eq!(aliases, ["WGS84", "WGS 1984"]);
    assert!(matches!(dataset.rows("EPSG", "Broken"), Err(DatasetError::Decompress { .. })));
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "epsg", "Datum.txt", &[0x36, 0x33, 0xC3, 0x28]);
    let dataset = DirectoryDataset::builder().root(temp.path()).open().unwrap();
    assert!(matches!(dataset.rows("EPSG", "Datum"), Err(DatasetError::Encoding { .. })));
}

#[test]
fn test_custom_delimiter_and_authorities() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "epsg", "UnitOfMeasure.txt", b"9001|metre|length|1|1|");
    write(temp.path(), "ignf", "UnitOfMeasure.txt", b"");

    let dataset = DirectoryDataset::builder().root(temp.path()).delimiter('|').open().unwrap();
    assert_eq!(dataset.authorities(), ["EPSG", "IGNF"]);

    let row = dataset.rows("EPSG", "UnitOfMeasure").unwrap().next().unwrap();
    assert_eq!(row.code(), Some(9001));
    assert_eq!(row.len(), 6);
}

#[test]
fn test_dataset_is_usable_behind_arc_dyn() {
    let dataset: std::sync::Arc<dyn Dataset> =
        std::sync::Arc::new(MemoryDataset::builder().resource("EPSG", "Alias", "Area;1262;Earth").build());
    assert!(dataset.has_authority("EPSG"));
    assert_eq!(dataset.rows("EPSG", "Alias").unwrap().count(), 1);
}
