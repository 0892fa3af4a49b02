//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod bodies;
mod helpers;
mod scene;

#[cfg(test)]
mod tests;

use crate::schema::OrreryConfig;
use orrery_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &OrreryConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    scene::validate_window(&mut errors, config);
    scene::validate_camera(&mut errors, config);
    scene::validate_bloom(&mut errors, config);
    scene::validate_background(&mut errors, config);
    scene::validate_orbit(&mut errors, config);
    scene::validate_lighting(&mut errors, config);
    bodies::validate_sun(&mut errors, config);
    bodies::validate_bodies(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
