//! Per-environment configuration loading.
//!
//! This crate reads a `.env.<environment>` file, merges in caller-supplied
//! defaults, writes the result into an environment store, and optionally
//! validates the merged store against a schema.

pub mod constants;
mod loader;
pub mod schema;
pub mod store;

pub use loader::{
    ConfigError, DefaultValue, EnvConfig, EnvConfigOptions, LoadReport, env_var_or_none,
};
pub use schema::{
    EnvSchema, EnvValidator, FieldRule, JsonSchemaValidator, ValidationError, ValidationIssue,
    ValueKind,
};
pub use store::{EnvStore, MemoryEnv, ProcessEnv};
