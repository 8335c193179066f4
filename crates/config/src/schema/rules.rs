//! Declarative per-key rules.
//!
//! Values arrive as strings and are converted before type checks, so
//! `PORT=3000` satisfies a `port()` rule. Keys without a rule are permitted.

use regex::Regex;
use std::collections::BTreeMap;

use super::{EnvValidator, ValidationError, ValidationIssue};

/// Expected shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Integer,
    /// `true` or `false`, case-insensitive.
    Boolean,
    /// Integer in `0..=65535`.
    Port,
    /// Absolute URL with a scheme.
    Url,
}

impl ValueKind {
    fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Number | ValueKind::Integer | ValueKind::Port)
    }
}

/// Rule for a single key, built fluently.
#[derive(Debug, Clone)]
pub struct FieldRule {
    kind: ValueKind,
    required: bool,
    allow_empty: bool,
    allowed: Option<Vec<String>>,
    pattern: Option<Regex>,
    min: Option<f64>,
    max: Option<f64>,
}

impl FieldRule {
    fn of(kind: ValueKind) -> Self {
        Self {
            kind,
            required: false,
            allow_empty: false,
            allowed: None,
            pattern: None,
            min: None,
            max: None,
        }
    }

    pub fn string() -> Self {
        Self::of(ValueKind::String)
    }

    pub fn number() -> Self {
        Self::of(ValueKind::Number)
    }

    pub fn integer() -> Self {
        Self::of(ValueKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(ValueKind::Boolean)
    }

    pub fn port() -> Self {
        Self::of(ValueKind::Port)
    }

    pub fn url() -> Self {
        Self::of(ValueKind::Url)
    }

    /// Fail when the key is absent.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept an empty string without further checks.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Restrict the value to an explicit set.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Require the value to match `pattern`.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Lower bound: numeric value for numeric kinds, character count otherwise.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Upper bound: numeric value for numeric kinds, character count otherwise.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check one value, returning the violation message if any.
    pub fn check(&self, key: &str, value: Option<&str>) -> Result<(), String> {
        let Some(value) = value else {
            if self.required {
                return Err(format!("\"{key}\" is required"));
            }
            return Ok(());
        };

        if value.is_empty() {
            if self.allow_empty {
                return Ok(());
            }
            return Err(format!("\"{key}\" is not allowed to be empty"));
        }

        let numeric = self.check_kind(key, value)?;

        if let Some(allowed) = &self.allowed {
            if !allowed.iter().any(|a| a == value) {
                return Err(format!(
                    "\"{key}\" must be one of [{}]",
                    allowed.join(", ")
                ));
            }
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return Err(format!(
                    "\"{key}\" with value \"{value}\" fails to match the required pattern: {pattern}"
                ));
            }
        }

        match numeric {
            Some(n) => self.check_numeric_bounds(key, n),
            None => self.check_length_bounds(key, value),
        }
    }

    /// Type check; returns the parsed number for numeric kinds.
    fn check_kind(&self, key: &str, value: &str) -> Result<Option<f64>, String> {
        let trimmed = value.trim();
        match self.kind {
            ValueKind::String => Ok(None),
            ValueKind::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| format!("\"{key}\" must be a number")),
            ValueKind::Integer => trimmed
                .parse::<i64>()
                .map(|n| Some(n as f64))
                .map_err(|_| format!("\"{key}\" must be an integer")),
            ValueKind::Boolean => {
                if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
                    Ok(None)
                } else {
                    Err(format!("\"{key}\" must be a boolean"))
                }
            }
            ValueKind::Port => trimmed
                .parse::<u16>()
                .map(|n| Some(f64::from(n)))
                .map_err(|_| format!("\"{key}\" must be a valid port")),
            ValueKind::Url => url::Url::parse(trimmed)
                .map(|_| None)
                .map_err(|_| format!("\"{key}\" must be a valid uri")),
        }
    }

    fn check_numeric_bounds(&self, key: &str, n: f64) -> Result<(), String> {
        if let Some(min) = self.min {
            if n < min {
                return Err(format!("\"{key}\" must be greater than or equal to {min}"));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(format!("\"{key}\" must be less than or equal to {max}"));
            }
        }
        Ok(())
    }

    fn check_length_bounds(&self, key: &str, value: &str) -> Result<(), String> {
        if self.kind.is_numeric() || self.kind == ValueKind::Boolean {
            return Ok(());
        }
        let len = value.chars().count() as f64;
        if let Some(min) = self.min {
            if len < min {
                return Err(format!(
                    "\"{key}\" length must be at least {min} characters long"
                ));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(format!(
                    "\"{key}\" length must be less than or equal to {max} characters long"
                ));
            }
        }
        Ok(())
    }
}

/// Declarative schema over environment keys. Unknown keys are always allowed.
#[derive(Debug, Clone, Default)]
pub struct EnvSchema {
    fields: BTreeMap<String, FieldRule>,
}

impl EnvSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `key`.
    pub fn field(mut self, key: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(key.into(), rule);
        self
    }

    pub fn rule(&self, key: &str) -> Option<&FieldRule> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl EnvValidator for EnvSchema {
    fn validate(&self, env: &BTreeMap<String, String>) -> Result<(), ValidationError> {
        let issues: Vec<ValidationIssue> = self
            .fields
            .iter()
            .filter_map(|(key, rule)| {
                rule.check(key, env.get(key).map(String::as_str))
                    .err()
                    .map(|message| ValidationIssue::new(key.as_str(), message))
            })
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}
