// Config loading against real files.

use std::fs;

use quesim::config::{ConfigError, load_config};
use quesim::simulation::ConnectionMode;

#[test]
fn loads_a_config_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quesim.toml");
    fs::write(
        &path,
        r#"
        [simulation]
        queue_count = 4
        processor_count = 2
        connection_mode = "one_to_many"
        max_ticks = 32
        "#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.simulation.queue_count, 4);
    assert_eq!(config.simulation.processor_count, 2);
    assert_eq!(config.simulation.connection_mode, ConnectionMode::OneToMany);
    assert_eq!(config.simulation.max_ticks, 32);
}

#[test]
fn missing_file_reports_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn malformed_toml_reports_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quesim.toml");
    fs::write(&path, "[simulation]\nqueue_count = \"many\"").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
