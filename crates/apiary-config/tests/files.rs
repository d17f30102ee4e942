//! Loading configuration from files on disk.

use std::io::Write;

use apiary_config::{ApiaryConfig, ConfigError, ConfigLoader, LogFormat};
use tempfile::{Builder, NamedTempFile};

fn file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_toml_file() {
    let file = file_with(
        ".toml",
        r#"
        [server]
        http_addr = "0.0.0.0:7070"
        shutdown_timeout_secs = 5

        [logging]
        format = "pretty"
        service_name = "users"
        "#,
    );

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.server.http_addr, "0.0.0.0:7070");
    assert_eq!(config.server.shutdown_timeout_secs, 5);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.service_name, "users");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn loads_json_file() {
    let file = file_with(".json", r#"{"server": {"max_body_bytes": 512}}"#);
    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.server.max_body_bytes, 512);
}

#[test]
fn optional_file_is_loaded_when_present() {
    let file = file_with(".toml", "[logging]\nlevel = \"warn\"\n");
    let config = ConfigLoader::new()
        .with_optional_file(file.path())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn rejects_unknown_extension() {
    let file = file_with(".yaml", "server: {}\n");
    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn rejects_unknown_keys() {
    let file = file_with(".toml", "[server]\nworkers = 4\n");
    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn dotenv_file_feeds_env_overrides() {
    let file = file_with(
        ".env",
        "APIARY_FILES_TEST__SERVER__REQUEST_TIMEOUT_MS=250\nAPIARY_FILES_TEST__LOGGING__LEVEL=debug\n",
    );

    let config = ConfigLoader::new()
        .with_dotenv_file(file.path())
        .unwrap()
        .with_env_prefix("APIARY_FILES_TEST")
        .load()
        .unwrap();

    assert_eq!(config.server.request_timeout_ms, 250);
    assert_eq!(config.logging.level, "debug");
    assert_ne!(config, ApiaryConfig::default());
}
