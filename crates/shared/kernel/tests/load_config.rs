use georef_kernel::config::{ConfigError, load_config, load_config_with_env};
use georef_kernel::domain::Family;
use georef_kernel::domain::config::{DatasetCompression, MalformedRowPolicy, ReferenceConfig};
use serial_test::serial;
use std::io::Write;
use tempfile::Builder;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn loads_toml_file() {
    let file = toml_file(
        r#"
        [dataset]
        root = "/srv/georef"
        compression = "lz4"

        [registry]
        malformed_rows = "abort"
        warm = ["ellipsoid", "geographic-crs"]
        "#,
    );

    let cfg: ReferenceConfig = load_config(Some(file.path())).expect("load config");
    assert_eq!(cfg.dataset.root, std::path::PathBuf::from("/srv/georef"));
    assert_eq!(cfg.dataset.compression, DatasetCompression::Lz4);
    assert_eq!(cfg.registry.malformed_rows, MalformedRowPolicy::Abort);
    assert_eq!(cfg.registry.warm, [Family::Ellipsoid, Family::GeographicCrs]);
    assert_eq!(cfg.registry.default_authority, "EPSG");
}

#[test]
#[serial]
fn environment_overrides_file() {
    let file = toml_file("[registry]\ndefault_authority = \"EPSG\"\n");

    let vars = [
        ("GEOREF__REGISTRY__DEFAULT_AUTHORITY".to_owned(), "IGNF".to_owned()),
        ("GEOREF__DATASET__COMPRESSION".to_owned(), "lz4".to_owned()),
        ("UNRELATED__DATASET__ROOT".to_owned(), "/elsewhere".to_owned()),
    ];
    let cfg: ReferenceConfig = load_config_with_env(Some(file.path()), vars).expect("load config");

    assert_eq!(cfg.registry.default_authority, "IGNF");
    assert_eq!(cfg.dataset.compression, DatasetCompression::Lz4);
    assert_eq!(cfg.dataset.root, std::path::PathBuf::from("data"));
}

#[test]
#[serial]
fn missing_explicit_file_is_an_error() {
    let result: Result<ReferenceConfig, _> = load_config(Some("/definitely/not/here/georef.toml"));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
#[serial]
fn default_file_is_optional() {
    let cfg: ReferenceConfig = load_config(None::<&str>).expect("defaults");
    assert_eq!(cfg.dataset.delimiter, ';');
}
