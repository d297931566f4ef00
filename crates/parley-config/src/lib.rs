//! Parley configuration system.
//!
//! Provides TOML-based settings with validation, `.env` loading, and the
//! startup-time resolution of the API key and system instruction. All
//! config sections use defaults so a missing or partial file works out
//! of the box.

pub mod app_config;
pub mod dotenv;
pub mod instructions;
pub mod paths;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use app_config::{api_key_from_env, AppConfig, API_KEY_ENV};
pub use dotenv::load_dotenv;
pub use schema::{ParleyConfig, DEFAULT_SYSTEM_INSTRUCTION};

use std::path::Path;

use parley_common::ConfigError;

/// Load and validate settings.
///
/// An explicit `path` must exist. Without one, the platform default path
/// is tried and built-in defaults are used if nothing is there.
pub fn load_config(path: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
