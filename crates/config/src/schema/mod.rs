//! Validation of the merged environment.
//!
//! Responsibilities:
//! - Define the `EnvValidator` capability the loader depends on.
//! - Define the structured `ValidationError` every validator reports.
//! - Provide the declarative `EnvSchema` and the `JsonSchemaValidator` adapter.
//!
//! Does NOT handle:
//! - Deciding when validation runs (see `loader/config.rs`).
//! - Converting values into typed configuration. Values stay strings.
//!
//! Invariants:
//! - Validators receive the full store snapshot and must permit keys they do
//!   not describe.
//! - A failed validation always carries at least one issue.

mod json;
mod rules;

use std::collections::BTreeMap;
use std::fmt;

pub use json::JsonSchemaValidator;
pub use regex::Regex;
pub use rules::{EnvSchema, FieldRule, ValueKind};

/// Accepts a string-keyed environment and reports success or a structured error.
pub trait EnvValidator {
    fn validate(&self, env: &BTreeMap<String, String>) -> Result<(), ValidationError>;
}

impl<F> EnvValidator for F
where
    F: Fn(&BTreeMap<String, String>) -> Result<(), ValidationError>,
{
    fn validate(&self, env: &BTreeMap<String, String>) -> Result<(), ValidationError> {
        self(env)
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Offending key; empty when the issue concerns the environment as a whole.
    pub key: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every issue found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Build from a non-empty list of issues.
    ///
    /// An empty list is replaced by a generic issue so the error never
    /// renders as an empty message.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        if issues.is_empty() {
            return Self::single("", "validation failed");
        }
        Self { issues }
    }

    pub fn single(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(key, message)],
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issue messages joined with `". "`.
    pub fn message(&self) -> String {
        self.issues
            .iter()
            .map(|issue| issue.message.as_str())
            .collect::<Vec<_>>()
            .join(". ")
    }
}
