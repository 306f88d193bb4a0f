//! Configuration loading from disk and from the process environment.

use lunchsplit_cli::config::{ConfigError, ConfigSource, StorageBackend};
use lunchsplit_cli::LunchSplitConfig;
use lunchsplit_core::ExportFormat;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

const OVERRIDE_KEYS: [&str; 6] = [
    "LUNCHSPLIT_CONFIG_PATH",
    "LUNCHSPLIT_DATA_DIR",
    "LUNCHSPLIT_STORAGE_BACKEND",
    "LUNCHSPLIT_CURRENCY",
    "LUNCHSPLIT_EXPORT_DIR",
    "LUNCHSPLIT_LOG",
];

fn clear_env() {
    for key in OVERRIDE_KEYS {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let config = LunchSplitConfig::load_from(&path).unwrap();
    assert_eq!(config.source, ConfigSource::Missing(path));
    assert_eq!(config.display.currency(), "TJS");
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[storage\nbackend = ").unwrap();
    assert!(matches!(LunchSplitConfig::load_from(&path), Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn test_config_path_and_overrides_from_environment() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lunchsplit.toml");
    std::fs::write(
        &path,
        r#"
[storage]
backend = "memory"

[export]
default_format = "json"

[logging]
filter = "lunchsplit=warn"
json = true
"#,
    )
    .unwrap();

    // SAFETY: serialized with every other test that touches the environment.
    unsafe {
        std::env::set_var("LUNCHSPLIT_CONFIG_PATH", &path);
        std::env::set_var("LUNCHSPLIT_DATA_DIR", "/var/lib/lunchsplit");
        std::env::set_var("LUNCHSPLIT_LOG", "lunchsplit=trace");
    }

    let config = LunchSplitConfig::load().unwrap().apply_env_overrides().unwrap();
    clear_env();

    assert_eq!(config.source, ConfigSource::File(path));
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/lunchsplit"));
    assert_eq!(config.export.default_format, ExportFormat::Json);
    assert_eq!(config.logging.filter, "lunchsplit=trace");
    assert!(config.logging.json);
}

#[test]
#[serial]
fn test_invalid_backend_in_environment() {
    clear_env();
    // SAFETY: serialized with every other test that touches the environment.
    unsafe { std::env::set_var("LUNCHSPLIT_STORAGE_BACKEND", "postgres") };
    let result = LunchSplitConfig::default().apply_env_overrides();
    clear_env();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
