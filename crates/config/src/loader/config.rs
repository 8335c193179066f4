//! The load cycle: environment file, then defaults, then validation.
//!
//! Responsibilities:
//! - Own the loader state (environment name, schema, defaults, directory, store).
//! - Run the three-step cycle on construction and on every switch.
//!
//! Does NOT handle:
//! - Dotenv syntax (delegated to `dotenvy` via dotenv.rs).
//! - Rule evaluation (delegated to the configured `EnvValidator`).
//!
//! Invariants / Assumptions:
//! - File values overwrite existing store values unconditionally.
//! - Defaults only fill keys that are absent or empty after the file step.
//! - Cycles are cumulative; nothing is ever removed from the store.
//! - A failed cycle does not roll back writes, and consumes the loader.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::builder::EnvConfigOptions;
use super::defaults::DefaultValue;
use super::dotenv::{env_file_name, read_env_file, resolve_base_dir};
use super::error::ConfigError;
use super::report::LoadReport;
use crate::schema::EnvValidator;
use crate::store::{EnvStore, ProcessEnv};

/// Loads `.env.<env>` into an environment store and keeps it valid.
pub struct EnvConfig<S: EnvStore = ProcessEnv> {
    env: String,
    schema: Option<Box<dyn EnvValidator>>,
    defaults: BTreeMap<String, DefaultValue>,
    config_path: PathBuf,
    store: S,
    report: LoadReport,
}

impl EnvConfig<ProcessEnv> {
    /// Load into the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment file exists but cannot be read or
    /// parsed, or if the merged environment fails validation. Writes made
    /// before the failure stay in place.
    pub fn new(options: EnvConfigOptions) -> Result<Self, ConfigError> {
        Self::with_store(options, ProcessEnv)
    }
}

impl<S: EnvStore> EnvConfig<S> {
    /// Load into `store` instead of the process environment.
    pub fn with_store(options: EnvConfigOptions, store: S) -> Result<Self, ConfigError> {
        let config_path = resolve_base_dir(options.config_path.as_deref())?;
        let mut config = Self {
            env: options.env,
            schema: options.schema,
            defaults: options.defaults,
            config_path,
            store,
            report: LoadReport::default(),
        };
        config.load()?;
        Ok(config)
    }

    /// Switch to another environment name and reload.
    pub fn switch_env(mut self, env: impl Into<String>) -> Result<Self, ConfigError> {
        self.env = env.into();
        self.load()?;
        Ok(self)
    }

    /// Switch to another directory and reload.
    pub fn set_config_path(mut self, path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        self.config_path = resolve_base_dir(Some(path.as_path()))?;
        self.load()?;
        Ok(self)
    }

    /// Run the cycle again with unchanged parameters.
    pub fn reload(mut self) -> Result<Self, ConfigError> {
        self.load()?;
        Ok(self)
    }

    fn load(&mut self) -> Result<(), ConfigError> {
        let env_file = self.env_file_path();
        let mut report = LoadReport {
            env_file: env_file.clone(),
            ..LoadReport::default()
        };

        match read_env_file(&env_file)? {
            Some(pairs) => {
                for (key, value) in pairs {
                    self.store.set(&key, &value);
                    report.keys_loaded.push(key);
                }
                report.file_found = true;
            }
            None => {
                tracing::warn!(
                    path = %env_file.display(),
                    "Environment file {} not found",
                    env_file_name(&self.env)
                );
            }
        }

        report.defaults_applied = self.apply_defaults();

        tracing::debug!(
            env = %self.env,
            keys_loaded = report.keys_loaded.len(),
            defaults_applied = report.defaults_applied.len(),
            "Environment loaded"
        );
        self.report = report;

        self.validate()
    }

    /// Fill absent or empty keys; returns the keys that were filled.
    fn apply_defaults(&mut self) -> Vec<String> {
        let mut applied = Vec::new();
        for (key, value) in &self.defaults {
            let missing = self.store.get(key).is_none_or(|current| current.is_empty());
            if missing {
                self.store.set(key, &value.to_string());
                applied.push(key.clone());
            }
        }
        applied
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(schema) = &self.schema {
            schema.validate(&self.store.snapshot())?;
        }
        Ok(())
    }

    /// Current environment name.
    pub fn env(&self) -> &str {
        &self.env
    }

    /// Absolute directory searched for environment files.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Full path of the file the next cycle will look for.
    pub fn env_file_path(&self) -> PathBuf {
        self.config_path.join(env_file_name(&self.env))
    }

    pub fn defaults(&self) -> &BTreeMap<String, DefaultValue> {
        &self.defaults
    }

    pub fn has_schema(&self) -> bool {
        self.schema.is_some()
    }

    /// Value of `key` in the store.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Summary of the most recent cycle.
    pub fn last_report(&self) -> &LoadReport {
        &self.report
    }
}

impl<S: EnvStore + fmt::Debug> fmt::Debug for EnvConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("env", &self.env)
            .field("has_schema", &self.schema.is_some())
            .field("defaults", &self.defaults)
            .field("config_path", &self.config_path)
            .field("store", &self.store)
            .finish()
    }
}
