use std::{io::Write, time::Duration};

use docshim::{
    ClientConfig, get_firestore, init, initialize_app,
    config::{ConfigError, DEFAULT_BASE_URL},
};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_config_file_round_trips_all_fields() {
    let file = write_config(
        r#"{
            "base_url": "https://api.example.com/v1",
            "timeout_secs": 5,
            "singular_names": {"orders": "order"}
        }"#,
    );

    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base_url, "https://api.example.com/v1");
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.singular_names.singular("orders").unwrap(), "order");
}

#[test]
fn test_empty_config_object_takes_defaults() {
    let file = write_config("{}");
    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_missing_config_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClientConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_file_error());
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_config_file_is_parse_error() {
    let file = write_config("{ base_url: nope");
    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_initialize_app_then_get_firestore() {
    let file = write_config(r#"{"base_url": "http://127.0.0.1:3001", "singular_names": {"lists": "list"}}"#);
    let app = initialize_app(ClientConfig::from_file(file.path()).unwrap());

    let db = get_firestore(&app).unwrap();
    assert_eq!(db.transport().transport_type(), "http");
    assert_eq!(db.singular_names().foreign_key("lists").unwrap(), "listId");
}

#[test]
fn test_bad_base_url_surfaces_as_config_error() {
    let app = initialize_app(ClientConfig::new("ftp://example.com"));
    let err = get_firestore(&app).unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(err.module(), "config");

    assert!(init("localhost:3001/no-scheme").is_err());
    assert!(init("http://localhost:3001").is_ok());
}
