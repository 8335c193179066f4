//! Loader options builder.
//!
//! Responsibilities:
//! - Collect the environment name, schema, defaults, and search directory.
//! - Resolve options from `ENVIRO_*` process variables on request.
//!
//! Does NOT handle:
//! - Running the load cycle (see config.rs).
//!
//! Invariants / Assumptions:
//! - Unset options fall back to `development`, no schema, no defaults, and
//!   the current working directory.
//! - Builder methods called after `from_env()` take precedence over it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::defaults::DefaultValue;
use super::env::apply_env;
use crate::constants::DEFAULT_ENV;
use crate::schema::EnvValidator;

/// Options accepted when constructing an `EnvConfig`.
pub struct EnvConfigOptions {
    pub(crate) env: String,
    pub(crate) schema: Option<Box<dyn EnvValidator>>,
    pub(crate) defaults: BTreeMap<String, DefaultValue>,
    pub(crate) config_path: Option<PathBuf>,
}

impl Default for EnvConfigOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvConfigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfigOptions")
            .field("env", &self.env)
            .field("has_schema", &self.schema.is_some())
            .field("defaults", &self.defaults)
            .field("config_path", &self.config_path)
            .finish()
    }
}

impl EnvConfigOptions {
    pub fn new() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            schema: None,
            defaults: BTreeMap::new(),
            config_path: None,
        }
    }

    /// Read `ENVIRO_ENV` and `ENVIRO_CONFIG_PATH` from the process environment.
    pub fn from_env(mut self) -> Self {
        apply_env(&mut self);
        self
    }

    /// Select which `.env.<name>` file is loaded.
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    /// Validate the merged environment with `schema` after every cycle.
    pub fn with_schema(mut self, schema: impl EnvValidator + 'static) -> Self {
        self.schema = Some(Box::new(schema));
        self
    }

    /// Add one default, replacing any earlier default for the same key.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<DefaultValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Add several defaults.
    pub fn with_defaults<I, K, V>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DefaultValue>,
    {
        self.defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Directory searched for environment files.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_env(&mut self, env: String) {
        self.env = env;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }
}
