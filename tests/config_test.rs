//! Tests for server configuration loading.

use std::fs;
use tempfile::TempDir;

use ludo_lobby::ServerConfig;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.bind_address(), "127.0.0.1:3000");
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("lobby.toml");
    fs::write(
        &path,
        r#"host = "0.0.0.0"
port = 8080
log_filter = "debug,ludo_lobby=trace"
"#,
    )
    .expect("Failed to write TOML");

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.log_filter(), "debug,ludo_lobby=trace");
}

#[test]
fn test_missing_keys_take_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("lobby.toml");
    fs::write(&path, "port = 4000\n").expect("Failed to write TOML");

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 4000);
}

#[test]
fn test_overrides_win() {
    let config = ServerConfig::default().with_overrides(Some("localhost".to_string()), Some(9000));
    assert_eq!(config.bind_address(), "localhost:9000");

    let config = ServerConfig::default().with_overrides(None, None);
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_toml_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("lobby.toml");
    fs::write(&path, "port = \"not a number\"\n").expect("Failed to write TOML");

    let err = ServerConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}
