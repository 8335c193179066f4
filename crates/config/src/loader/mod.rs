//! Environment loader.
//!
//! Responsibilities:
//! - Load `.env.<env>` files into an environment store.
//! - Apply defaults to keys the file left absent or empty.
//! - Validate the merged store against an optional schema.
//!
//! Does NOT handle:
//! - Removing keys from the store or restoring earlier values.
//! - Watching files for changes.
//!
//! Invariants / Assumptions:
//! - The cycle order is always file, defaults, validation.
//! - An environment file that exists is always read.

mod builder;
mod config;
mod defaults;
mod dotenv;
mod env;
mod error;
mod report;

pub use builder::EnvConfigOptions;
pub use config::EnvConfig;
pub use defaults::DefaultValue;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use report::LoadReport;

#[cfg(test)]
mod tests;
