//! Centralized constants for environment loading.
//!
//! This module contains the default values and variable names shared by the
//! loader and its option resolution.

// =============================================================================
// Loader Defaults
// =============================================================================

/// Environment name used when none is configured.
pub const DEFAULT_ENV: &str = "development";

/// Prefix of every environment file; the environment name follows a dot.
pub const ENV_FILE_PREFIX: &str = ".env";

// =============================================================================
// Option Variables
// =============================================================================

/// Selects the environment name when options are resolved from the process.
pub const ENVIRO_ENV_VAR: &str = "ENVIRO_ENV";

/// Selects the directory searched for environment files.
pub const ENVIRO_CONFIG_PATH_VAR: &str = "ENVIRO_CONFIG_PATH";
