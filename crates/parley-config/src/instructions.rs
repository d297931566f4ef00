//! System instruction loading.
//!
//! The instruction file is read once at startup. Any failure degrades to
//! the configured fallback text; it never stops the server from starting.

use std::path::{Path, PathBuf};

use parley_common::ConfigError;
use tracing::{info, warn};

use crate::paths::resolve_beside_executable;
use crate::schema::InstructionsConfig;

/// Absolute location of the configured instruction file.
pub fn instructions_path(config: &InstructionsConfig) -> PathBuf {
    resolve_beside_executable(Path::new(&config.path))
}

/// Read an instruction file as UTF-8. A blank file counts as unreadable.
pub fn read_instructions(path: &Path) -> Result<String, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    if text.trim().is_empty() {
        return Err(ConfigError::ParseError(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(text)
}

/// Load the instruction at `path`, substituting `fallback` on any error.
pub fn load_system_instruction_at(path: &Path, fallback: &str) -> String {
    match read_instructions(path) {
        Ok(text) => {
            info!(path = %path.display(), chars = text.chars().count(), "loaded system instruction");
            text
        }
        Err(e) => {
            warn!("{e}; using the default system instruction");
            fallback.to_string()
        }
    }
}

/// Load the configured system instruction.
pub fn load_system_instruction(config: &InstructionsConfig) -> String {
    load_system_instruction_at(&instructions_path(config), &config.fallback)
}
