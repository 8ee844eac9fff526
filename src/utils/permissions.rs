//! File permission checks for the scanner binary

use std::path::Path;

/// Whether `path` has any execute bit set on Unix systems.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use semgrep_search::utils::permissions::is_executable;
///
/// assert!(is_executable(Path::new("/bin/sh")));
/// ```
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Windows has no execute bit; any existing file counts.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
