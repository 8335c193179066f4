//! Tests for environment file handling.
//!
//! Responsibilities:
//! - Test that missing files warn and continue.
//! - Test that invalid files return errors without leaking secrets.
//! - Test that an existing file is always read.
//! - Test that `$` in values is stored literally.
//!
//! Invariants / Assumptions:
//! - Error messages must never contain secret values from environment files.

use std::fs;
use tempfile::TempDir;

use super::{with_captured_logs, write_env_file};
use crate::loader::builder::EnvConfigOptions;
use crate::loader::config::EnvConfig;
use crate::loader::error::ConfigError;
use crate::store::{EnvStore, MemoryEnv};

#[test]
fn test_missing_file_warns_and_applies_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = MemoryEnv::new();

    let (result, logs) = with_captured_logs(|| {
        EnvConfig::with_store(
            EnvConfigOptions::new()
                .with_env("staging")
                .with_config_path(temp_dir.path())
                .with_default("TIMEOUT", 30),
            store.clone(),
        )
    });

    let config = result.expect("Missing environment file should not be fatal");
    assert_eq!(store.get("TIMEOUT").as_deref(), Some("30"));
    assert!(!config.last_report().file_found);
    assert!(config.last_report().keys_loaded.is_empty());
    assert!(logs.contains("WARN"), "Expected a warning, got: {logs}");
    assert!(
        logs.contains("Environment file .env.staging not found"),
        "Expected missing-file message, got: {logs}"
    );
}

#[test]
fn test_existing_file_does_not_warn() {
    let temp_dir = TempDir::new().unwrap();
    write_env_file(temp_dir.path(), "development", "A=1\n");

    let (result, logs) = with_captured_logs(|| {
        EnvConfig::with_store(
            EnvConfigOptions::new().with_config_path(temp_dir.path()),
            MemoryEnv::new(),
        )
    });

    assert!(result.is_ok());
    assert!(!logs.contains("not found"), "Unexpected warning: {logs}");
}

#[test]
fn test_invalid_file_returns_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    write_env_file(temp_dir.path(), "development", "INVALID_LINE_WITHOUT_EQUALS");

    let result = EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        MemoryEnv::new(),
    );

    match result {
        Err(ConfigError::EnvFileParse { path, .. }) => {
            assert!(path.ends_with(".env.development"));
        }
        Err(other) => panic!("Invalid file should return EnvFileParse, got {}", other),
        Ok(_) => panic!("Invalid file should return EnvFileParse, got Ok"),
    }
}

#[test]
fn test_parse_error_does_not_leak_secrets_or_write_partially() {
    let temp_dir = TempDir::new().unwrap();
    let secret_value = "supersecret_token_12345";
    write_env_file(
        temp_dir.path(),
        "development",
        &format!("API_TOKEN={}\nINVALID_LINE_WITHOUT_EQUALS", secret_value),
    );

    let store = MemoryEnv::new();
    let result = EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        store.clone(),
    );

    match &result {
        Err(e) => {
            let error_string = e.to_string();
            assert!(
                !error_string.contains(secret_value),
                "Error message should NOT contain the secret value: {}",
                error_string
            );
        }
        Ok(_) => panic!("Expected error for invalid file, got Ok"),
    }
    assert!(store.get("API_TOKEN").is_none());
}

#[test]
fn test_existing_file_always_loads() {
    let temp_dir = TempDir::new().unwrap();
    write_env_file(temp_dir.path(), "development", "PORT=3000\n");

    let store = MemoryEnv::from_pairs([("DOTENV_DISABLED", "1")]);
    let config = EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        store.clone(),
    )
    .unwrap();

    assert!(config.last_report().file_found);
    assert_eq!(config.last_report().keys_loaded, vec!["PORT".to_string()]);
    assert_eq!(store.get("PORT").as_deref(), Some("3000"));
}

#[test]
fn test_file_setting_dotenv_disabled_does_not_stop_later_cycles() {
    let temp_dir = TempDir::new().unwrap();
    write_env_file(temp_dir.path(), "development", "DOTENV_DISABLED=1\nA=1\n");
    write_env_file(temp_dir.path(), "production", "A=2\n");

    let store = MemoryEnv::new();
    let config = EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        store.clone(),
    )
    .unwrap();
    let config = config.switch_env("production").unwrap();

    assert!(config.last_report().file_found);
    assert_eq!(store.get("A").as_deref(), Some("2"));
}

#[test]
fn test_invalid_file_is_never_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write_env_file(temp_dir.path(), "development", "INVALID_LINE_WITHOUT_EQUALS");

    let result = EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        MemoryEnv::from_pairs([("DOTENV_DISABLED", "true")]),
    );

    assert!(
        matches!(result, Err(ConfigError::EnvFileParse { .. })),
        "An existing invalid file must be parsed and rejected"
    );
}

#[test]
fn test_dollar_values_load_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        temp_dir.path(),
        "development",
        "PASSWORD=pa$word\nREF=$HOME\nBRACED=${HOME}\nQUOTED=\"x$y\"\n",
    );

    let store = MemoryEnv::from_pairs([("HOME", "/from-store")]);
    EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        store.clone(),
    )
    .unwrap();

    assert_eq!(store.get("PASSWORD").as_deref(), Some("pa$word"));
    assert_eq!(store.get("REF").as_deref(), Some("$HOME"));
    assert_eq!(store.get("BRACED").as_deref(), Some("${HOME}"));
    assert_eq!(store.get("QUOTED").as_deref(), Some("x$y"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_returns_read_error() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env_file(temp_dir.path(), "development", "A=1\n");

    let mut permissions = fs::metadata(&env_path).unwrap().permissions();
    permissions.set_mode(0o000);
    fs::set_permissions(&env_path, permissions).unwrap();

    let result = EnvConfig::with_store(
        EnvConfigOptions::new().with_config_path(temp_dir.path()),
        MemoryEnv::new(),
    );

    // Restore permissions for cleanup
    let mut permissions = fs::metadata(&env_path).unwrap().permissions();
    permissions.set_mode(0o644);
    fs::set_permissions(&env_path, permissions).unwrap();

    match &result {
        Err(ConfigError::EnvFileRead { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        Ok(_) => {
            // Running as root bypasses file permissions
        }
        Err(other) => panic!("Expected EnvFileRead error, got {}", other),
    }
}
