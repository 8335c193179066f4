//! JSON Schema adapter.
//!
//! The environment is presented to the schema as a flat object whose values
//! are all JSON strings, so type constraints should use `"type": "string"`
//! together with `pattern` or `enum`.

use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::{EnvValidator, ValidationError, ValidationIssue};
use crate::loader::ConfigError;

/// Validates the environment against a compiled Draft 7 JSON Schema.
pub struct JsonSchemaValidator {
    compiled: JSONSchema,
}

impl JsonSchemaValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSchema` if the schema itself is malformed.
    pub fn new(schema: &Value) -> Result<Self, ConfigError> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| ConfigError::InvalidSchema {
                message: e.to_string(),
            })?;
        Ok(Self { compiled })
    }

    /// Parse and compile a schema given as JSON text.
    pub fn from_json_str(schema: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(schema).map_err(|e| ConfigError::InvalidSchema {
                message: e.to_string(),
            })?;
        Self::new(&value)
    }
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl EnvValidator for JsonSchemaValidator {
    fn validate(&self, env: &BTreeMap<String, String>) -> Result<(), ValidationError> {
        let instance = Value::Object(
            env.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<String, Value>>(),
        );

        match self.compiled.validate(&instance) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let issues = errors
                    .map(|e| {
                        let path = e.instance_path.to_string();
                        let key = path.trim_start_matches('/').to_string();
                        ValidationIssue::new(key, e.to_string())
                    })
                    .collect();
                Err(ValidationError::new(issues))
            }
        }
    }
}
