//! Configuration module
//!
//! Settings are read from an optional TOML file (`.semgrep-search.toml` in
//! the working directory by default). Command line flags always win over the
//! file, and the file wins over built-in defaults.

pub mod loader;

pub use loader::Settings;

use serde::Deserialize;
use std::path::PathBuf;

/// Scanner configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ScannerSettings {
    /// Path to the scanner binary (defaults to `semgrep` from PATH)
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Extra arguments appended to every scanner invocation
    #[serde(default)]
    pub args: Vec<String>,
}
