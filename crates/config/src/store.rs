//! Environment stores the loader writes into.
//!
//! Responsibilities:
//! - Define the `EnvStore` capability (get, set, snapshot).
//! - Provide `ProcessEnv`, backed by the real process environment.
//! - Provide `MemoryEnv`, an isolated table for tests and embedding.
//!
//! Does NOT handle:
//! - Removing keys. The loader only adds or overwrites.
//! - Synchronization. `ProcessEnv` mutates process-global state unguarded.
//!
//! Invariants:
//! - Keys and values are UTF-8 strings; `ProcessEnv::snapshot` skips others.
//! - Cloning a `MemoryEnv` yields another handle onto the same table.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A string-keyed table of environment values.
pub trait EnvStore {
    /// Current value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: &str);

    /// Copy of every entry, ordered by key.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// The process-wide environment inherited by child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: loading is a single-threaded bootstrap step; callers must not
        // read or write the environment from other threads concurrently.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// In-memory environment table.
///
/// Clones share storage, so a test can keep a handle while the loader owns
/// another one.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table pre-populated with `pairs`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: Rc::new(RefCell::new(vars)),
        }
    }

    /// Remove every entry.
    pub fn reset(&self) {
        self.vars.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.vars.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.borrow().is_empty()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.borrow().clone()
    }
}
