use georef_domain::config::{
    AliasScope, DatasetCompression, DatasetConfig, LoggingConfig, MalformedRowPolicy, ReferenceConfig,
    RegistryConfig,
};
use georef_domain::{Family, FamilySet};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let dataset = DatasetConfig::default();
    assert_eq!(dataset.root, std::path::PathBuf::from("data"));
    assert_eq!(dataset.compression, DatasetCompression::None);
    assert_eq!(dataset.delimiter, ';');

    let registry = RegistryConfig::default();
    assert_eq!(registry.default_authority, "EPSG");
    assert_eq!(registry.malformed_rows, MalformedRowPolicy::Skip);
    assert_eq!(registry.alias_scope, AliasScope::PerFamily);
    assert!(registry.warm_set().is_empty());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.directory.is_none());
}

#[test]
fn reference_config_deserializes() {
    let raw = json!({
        "dataset": { "root": "/srv/georef", "compression": "lz4" },
        "registry": {
            "default_authority": "IGNF",
            "malformed_rows": "abort",
            "alias_scope": "global",
            "warm": ["geographic-crs", "ellipsoid"]
        },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: ReferenceConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.dataset.root, std::path::PathBuf::from("/srv/georef"));
    assert_eq!(cfg.dataset.compression, DatasetCompression::Lz4);
    assert_eq!(cfg.dataset.delimiter, ';');
    assert_eq!(cfg.registry.malformed_rows, MalformedRowPolicy::Abort);
    assert_eq!(cfg.registry.alias_scope, AliasScope::Global);
    assert_eq!(cfg.registry.warm, [Family::GeographicCrs, Family::Ellipsoid]);
    assert_eq!(cfg.registry.warm_set(), FamilySet::GEOGRAPHIC_CRS | FamilySet::ELLIPSOID);
    assert!(cfg.logging.json);
}

#[test]
fn config_is_cheap_to_clone_and_copy_on_write() {
    let original = ReferenceConfig::default();
    let mut copy = original.clone();
    copy.registry.default_authority = "IGNF".to_owned();

    assert_eq!(original.registry.default_authority, "EPSG");
    assert_eq!(copy.registry.default_authority, "IGNF");
}
