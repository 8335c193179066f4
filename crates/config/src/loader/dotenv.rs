//! Environment file location and parsing.
//!
//! Responsibilities:
//! - Resolve `<config_path>/.env.<env>` against the current directory.
//! - Read the file and parse it with `dotenvy`, keeping `$` literal.
//!
//! Does NOT handle:
//! - Writing parsed pairs into a store (see config.rs).
//! - Warning about missing files (the caller decides how to report it).
//!
//! Invariants:
//! - Parsing is all-or-nothing: a syntax error yields no pairs at all.
//! - Errors never include raw line contents.
//! - Values are never expanded: `$VAR` and `${VAR}` are stored as written,
//!   and nothing is read from the process environment.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::constants::ENV_FILE_PREFIX;

/// File name for an environment, e.g. `.env.production`.
pub fn env_file_name(env: &str) -> String {
    format!("{ENV_FILE_PREFIX}.{env}")
}

/// Directory to search, made absolute against the current working directory.
pub fn resolve_base_dir(config_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match config_path {
        Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
        Some(path) => Ok(current_dir()?.join(path)),
        None => current_dir(),
    }
}

fn current_dir() -> Result<PathBuf, ConfigError> {
    std::env::current_dir().map_err(ConfigError::CurrentDir)
}

/// Read and parse the file at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_env_file(path: &Path) -> Result<Option<Vec<(String, String)>>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::EnvFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_env(&content, path).map(Some)
}

/// Parse dotenv-formatted text into ordered key/value pairs.
pub fn parse_env(content: &str, path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let content = escape_dollars(content);
    dotenvy::from_read_iter(content.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| match e {
            dotenvy::Error::LineParse(_, error_index) => ConfigError::EnvFileParse {
                path: path.to_path_buf(),
                error_index,
            },
            dotenvy::Error::Io(source) => ConfigError::EnvFileRead {
                path: path.to_path_buf(),
                source,
            },
            _ => ConfigError::EnvFileUnknown {
                path: path.to_path_buf(),
            },
        })
}

/// Scanner position while escaping, tracking dotenv quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    LineStart,
    Value,
    WhiteSpace,
    Escape,
    Strong,
    Weak,
    WeakEscape,
    Comment,
}

impl Scan {
    fn next(self, c: char) -> Scan {
        match (self, c) {
            (Scan::Strong, '\'') => Scan::Value,
            (Scan::Strong, _) => Scan::Strong,
            (Scan::Weak, '"') => Scan::Value,
            (Scan::Weak, '\\') => Scan::WeakEscape,
            (Scan::Weak, _) | (Scan::WeakEscape, _) => Scan::Weak,
            (Scan::Escape, _) => Scan::Value,
            (Scan::Comment, '\n') => Scan::LineStart,
            (Scan::Comment, _) => Scan::Comment,
            (Scan::LineStart, c) if c.is_whitespace() => Scan::LineStart,
            (Scan::LineStart | Scan::WhiteSpace, '#') => Scan::Comment,
            (_, '\n') => Scan::LineStart,
            (_, '\\') => Scan::Escape,
            (_, '\'') => Scan::Strong,
            (_, '"') => Scan::Weak,
            (_, c) if c.is_whitespace() => Scan::WhiteSpace,
            _ => Scan::Value,
        }
    }

    /// Whether `dotenvy` would start a substitution at a `$` seen here.
    fn expands(self) -> bool {
        matches!(
            self,
            Scan::LineStart | Scan::Value | Scan::WhiteSpace | Scan::Weak
        )
    }
}

/// Backslash-escape every `$` that `dotenvy` would otherwise expand.
///
/// Single-quoted text, already escaped `\$`, and comments are left alone.
fn escape_dollars(content: &str) -> Cow<'_, str> {
    if !content.contains('$') {
        return Cow::Borrowed(content);
    }

    let mut escaped = String::with_capacity(content.len() + 8);
    let mut state = Scan::LineStart;
    for c in content.chars() {
        if c == '$' && state.expands() {
            escaped.push('\\');
        }
        escaped.push(c);
        state = state.next(c);
    }
    Cow::Owned(escaped)
}
