//! Full configuration validation.
//!
//! Checks numeric ranges and required strings, collecting every problem
//! into a single `ConfigError` so a bad file reports all of its mistakes
//! at once.

mod helpers;


use crate::schema::ParleyConfig;
use parley_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ParleyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_non_empty(&mut errors, "server.host", &config.server.host);
    validate_range(
        &mut errors,
        "server.session_ttl_secs",
        config.server.session_ttl_secs,
        60,
        2_592_000,
    );

    validate_non_empty(&mut errors, "model.name", &config.model.name);
    validate_non_empty(&mut errors, "model.api_base", &config.model.api_base);
    validate_range(
        &mut errors,
        "model.max_output_tokens",
        u64::from(config.model.max_output_tokens),
        1,
        65_536,
    );
    validate_range_f64(
        &mut errors,
        "model.temperature",
        config.model.temperature,
        0.0,
        2.0,
    );
    validate_range(
        &mut errors,
        "model.request_timeout_secs",
        config.model.request_timeout_secs,
        1,
        600,
    );

    // Capacity 1 cannot hold a user turn together with its reply.
    if config.history.capacity == 1 {
        errors.push("history.capacity = 1 must be 0 (unbounded) or at least 2".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
