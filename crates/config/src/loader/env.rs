//! Environment variable helpers for loader options.
//!
//! Responsibilities:
//! - Read process variables with empty/whitespace filtering.
//! - Apply `ENVIRO_ENV` and `ENVIRO_CONFIG_PATH` to loader options.
//!
//! Does NOT handle:
//! - Reading environment files (see dotenv.rs).
//! - Running the load cycle (see config.rs).
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use std::path::PathBuf;

use super::builder::EnvConfigOptions;
use crate::constants::{ENVIRO_CONFIG_PATH_VAR, ENVIRO_ENV_VAR};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply option variables from the process environment.
///
/// Only variables that are set override the options' current values.
pub fn apply_env(options: &mut EnvConfigOptions) {
    if let Some(env) = env_var_or_none(ENVIRO_ENV_VAR) {
        options.set_env(env);
    }
    if let Some(path) = env_var_or_none(ENVIRO_CONFIG_PATH_VAR) {
        options.set_config_path(Some(PathBuf::from(path)));
    }
}
