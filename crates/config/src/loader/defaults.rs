//! Default values applied after the environment file.
//!
//! Responsibilities:
//! - Represent a default as a string, integer, float, or boolean.
//! - Render each default in the exact string form written to the store.
//!
//! Does NOT handle:
//! - Deciding whether a default applies (see `config.rs`).
//!
//! Invariants:
//! - Integral floats render without a fractional part (`30.0` -> `"30"`).
//! - Non-finite floats render as `Infinity`, `-Infinity`, and `NaN`; `-0.0` renders as `0`.
//! - Booleans render as `true` / `false`.

use std::fmt;

/// A fallback value for one key.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Str(s) => f.write_str(s),
            DefaultValue::Int(n) => write!(f, "{n}"),
            DefaultValue::Float(n) => fmt_float(*n, f),
            DefaultValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn fmt_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Str(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::Str(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DefaultValue {
                fn from(value: $t) -> Self {
                    DefaultValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);
