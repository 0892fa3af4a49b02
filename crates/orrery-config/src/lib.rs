//! Orrery configuration system.
//!
//! Provides TOML-based configuration with live reload and full
//! validation. All config sections use defaults so partial configs
//! work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use orrery_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{OrreryConfig, CONFIG_SCHEMA_VERSION};
pub use watcher::ConfigWatcher;

use orrery_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default file if none exists.
pub fn load_config() -> Result<OrreryConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<OrreryConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &OrreryConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&OrreryConfig::default());
        for section in [
            "\"window\"",
            "\"camera\"",
            "\"bloom\"",
            "\"background\"",
            "\"orbit\"",
            "\"lighting\"",
            "\"sun\"",
            "\"bodies\"",
            "\"logging\"",
            "\"assets\"",
        ] {
            assert!(json.contains(section), "missing {section}");
        }
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&OrreryConfig::default());
        let parsed: OrreryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bodies.len(), 8);
        assert_eq!(parsed.bodies[5].name, "saturn");
        assert!((parsed.bloom.strength - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn load_config_from_missing_file_is_not_found() {
        let err = load_config_from(Path::new("/tmp/orrery_missing_config_file.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bloom]\npasses = 9\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
