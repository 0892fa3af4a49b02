//! Tests for config validation.

use super::*;
use crate::schema::{BodyConfig, OrreryConfig, RingConfig};

fn error_text(config: &OrreryConfig) -> String {
    match validate(config) {
        Err(ConfigError::ValidationError(msg)) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn default_config_is_valid() {
    assert!(validate(&OrreryConfig::default()).is_ok());
}

#[test]
fn bloom_passes_out_of_range() {
    let mut config = OrreryConfig::default();
    config.bloom.passes = 0;
    assert!(error_text(&config).contains("bloom.passes = 0 is out of range [1, 5]"));
}

#[test]
fn bloom_strength_zero_is_valid() {
    let mut config = OrreryConfig::default();
    config.bloom.strength = 0.0;
    assert!(validate(&config).is_ok());
}

#[test]
fn nan_strength_is_rejected() {
    let mut config = OrreryConfig::default();
    config.bloom.strength = f32::NAN;
    assert!(error_text(&config).contains("bloom.strength"));
}

#[test]
fn multiple_errors_are_collected() {
    let mut config = OrreryConfig::default();
    config.window.width = 10;
    config.bloom.threshold = 2.0;
    config.camera.fov_degrees = 170.0;
    let msg = error_text(&config);
    assert!(msg.contains("window.width"));
    assert!(msg.contains("bloom.threshold"));
    assert!(msg.contains("camera.fov_degrees"));
    assert_eq!(msg.matches("; ").count(), 2);
}

#[test]
fn camera_far_must_exceed_near() {
    let mut config = OrreryConfig::default();
    config.camera.far = 0.05;
    assert!(error_text(&config).contains("camera.far"));
}

#[test]
fn camera_position_equal_target_rejected() {
    let mut config = OrreryConfig::default();
    config.camera.position = [0.0, 0.0, 0.0];
    assert!(error_text(&config).contains("camera.position"));
}

#[test]
fn bad_color_rejected() {
    let mut config = OrreryConfig::default();
    config.orbit.marker_color = "lightgray".into();
    assert!(error_text(&config).contains("orbit.marker_color"));
}

#[test]
fn duplicate_body_names_rejected() {
    let mut config = OrreryConfig::default();
    config.bodies.push(BodyConfig {
        name: "earth".into(),
        ..BodyConfig::default()
    });
    assert!(error_text(&config).contains("bodies.earth: duplicate body name"));
}

#[test]
fn inverted_ring_rejected() {
    let mut config = OrreryConfig::default();
    config.bodies[0].ring = Some(RingConfig {
        inner_scale: 3.0,
        outer_scale: 2.0,
        ..RingConfig::default()
    });
    assert!(error_text(&config).contains("bodies.mercury.ring"));
}

#[test]
fn empty_body_list_is_valid() {
    let mut config = OrreryConfig::default();
    config.bodies.clear();
    assert!(validate(&config).is_ok());
}
