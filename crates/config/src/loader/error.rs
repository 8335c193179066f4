//! Error types for environment loading.
//!
//! Responsibilities:
//! - Define error variants for every fatal failure of a load cycle.
//!
//! Does NOT handle:
//! - Missing environment files. Those are warnings, not errors.
//!
//! Invariants:
//! - Variants carry the file path where one is involved.
//! - Dotenv errors NEVER include raw file line contents to prevent secret leakage.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ValidationError;

/// Errors that can occur during a load cycle.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The merged environment did not satisfy the configured schema.
    #[error("Environment validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("Failed to read environment file at {path}: {source}")]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The environment file has invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error("Failed to parse environment file at {path} (position {error_index})")]
    EnvFileParse { path: PathBuf, error_index: usize },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load environment file at {path}")]
    EnvFileUnknown { path: PathBuf },

    #[error("Unable to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}
