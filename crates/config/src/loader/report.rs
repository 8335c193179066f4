//! Summary of the most recent load cycle.

use std::path::PathBuf;

/// What a load cycle read and wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The file the cycle looked for.
    pub env_file: PathBuf,
    /// Whether that file existed and was parsed.
    pub file_found: bool,
    /// Keys written from the file, in file order.
    pub keys_loaded: Vec<String>,
    /// Keys filled from defaults, in key order.
    pub defaults_applied: Vec<String>,
}
