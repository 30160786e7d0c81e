use std::fs;

use pretty_assertions::assert_eq;
use schemastate::advisor::Status;
use schemastate::config::{Settings, SettingsError};
use schemastate::metadata::PartitionType;
use schemastate::state::{ColumnState, PartitionGroup, PartitionState, TableState};

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemastate.toml");
    fs::write(
        &path,
        r#"
[render]
partition_engine = "MyISAM"

[advisor]
max_index_keys = 3
level = "error"
"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.render.partition_engine, "MyISAM");
    assert_eq!(settings.advisor.max_index_keys, 3);
    assert_eq!(settings.advisor.level, Status::Error);
}

#[test]
fn test_missing_sections_use_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.render.partition_engine, "InnoDB");
    assert_eq!(settings.advisor.max_index_keys, 5);
    assert_eq!(settings.advisor.level, Status::Warning);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::FileNotFound(_)));
}

#[test]
fn test_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[render\npartition_engine = ").unwrap();

    let err = Settings::from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::ParseError(_)));
}

#[test]
fn test_load_honors_config_env_var() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[advisor]\nmax_index_keys = 9\n").unwrap();

    std::env::set_var("SCHEMASTATE_CONFIG", &path);
    let settings = Settings::load();
    std::env::remove_var("SCHEMASTATE_CONFIG");

    assert_eq!(settings.unwrap().advisor.max_index_keys, 9);
}

#[test]
fn test_render_options_drive_partition_engine() {
    let settings = Settings::from_toml("[render]\npartition_engine = \"Aria\"\n").unwrap();

    let mut table = TableState::new(0, "t");
    table.insert_column(ColumnState::new(0, "id", "int"));
    table.partition = Some(
        PartitionGroup::new(PartitionType::Hash, "`id`")
            .partition(PartitionState::new(0, "p0", "1")),
    );

    let ddl = table.to_ddl_with(&settings.render_options()).unwrap();
    assert!(ddl.contains("ENGINE = Aria"));
}
