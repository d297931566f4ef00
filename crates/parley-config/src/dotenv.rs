//! `.env` file loading (KEY=VALUE lines).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::paths::executable_dir;

/// Parse `.env` contents into key/value pairs.
///
/// Blank lines and `#` comments are skipped; surrounding quotes on values
/// are stripped.
pub fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Candidate `.env` locations, most specific first.
fn candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = executable_dir() {
        paths.push(dir.join(".env"));
    }
    paths.push(PathBuf::from(".env"));
    paths
}

/// Load the first `.env` found next to the executable or in the current
/// directory. Variables already present in the environment win.
///
/// Returns the file that was loaded, if any. Must run before any threads
/// are spawned.
pub fn load_dotenv() -> Option<PathBuf> {
    for path in candidates() {
        if load_dotenv_from(&path) {
            return Some(path);
        }
    }
    None
}

/// Load one `.env` file. Returns false if it could not be read.
pub fn load_dotenv_from(path: &Path) -> bool {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return false;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    debug!("loaded environment from {}", path.display());
    true
}
