//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use orrery_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_orrery_config.toml"));
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[bloom]
strength = 1.25

[orbit]
orbital_speed = 0.01
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.bloom.strength - 1.25).abs() < f32::EPSILON);
    assert!((config.orbit.orbital_speed - 0.01).abs() < f64::EPSILON);
    // Defaults preserved
    assert!((config.bloom.radius - 0.1).abs() < f32::EPSILON);
    assert_eq!(config.bodies.len(), 8);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bloom]\nstrength = 50.0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.bloom.strength - 50.0).abs() < f32::EPSILON);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orrery").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.bodies.len(), 8);
    assert_eq!(config.window.title, "Orrery");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::OrreryConfig;

    let config: OrreryConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("orrery"));
        assert!(path_str.ends_with("config.toml"));
    }
}
