//! Utility modules for semgrep-search

pub mod permissions;
pub mod timing;

use std::path::{Path, PathBuf};

/// Make `path` absolute against the current directory without touching the
/// filesystem. Falls back to `path` itself if the current directory is gone.
pub fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
