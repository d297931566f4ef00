//! Locations relative to the running executable.

use std::path::{Path, PathBuf};

/// Directory containing the running executable, if it can be determined.
pub fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = std::fs::canonicalize(&exe).unwrap_or(exe);
    exe.parent().map(Path::to_path_buf)
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Resolve `path` against the executable's directory, never the process
/// working directory. Falls back to the path as given when the executable
/// location is unknown.
pub fn resolve_beside_executable(path: &Path) -> PathBuf {
    match executable_dir() {
        Some(dir) => resolve_against(&dir, path),
        None => path.to_path_buf(),
    }
}
