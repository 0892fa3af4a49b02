//! Window, camera, bloom, background, orbit, and lighting validation.

use super::helpers::{validate_color, validate_range, validate_range_f64};
use crate::schema::OrreryConfig;

pub(super) fn validate_window(errors: &mut Vec<String>, config: &OrreryConfig) {
    validate_range(errors, "window.width", config.window.width, 320, 7680);
    validate_range(errors, "window.height", config.window.height, 240, 4320);
}

pub(super) fn validate_camera(errors: &mut Vec<String>, config: &OrreryConfig) {
    let c = &config.camera;
    validate_range_f64(errors, "camera.fov_degrees", c.fov_degrees as f64, 10.0, 120.0);
    if !(c.near > 0.0) {
        errors.push(format!("camera.near = {} must be positive", c.near));
    }
    if !(c.far > c.near) {
        errors.push(format!(
            "camera.far = {} must be greater than camera.near = {}",
            c.far, c.near
        ));
    }
    if c.position == c.target {
        errors.push("camera.position must differ from camera.target".into());
    }
}

pub(super) fn validate_bloom(errors: &mut Vec<String>, config: &OrreryConfig) {
    let b = &config.bloom;
    validate_range_f64(errors, "bloom.strength", b.strength as f64, 0.0, 10.0);
    validate_range_f64(errors, "bloom.radius", b.radius as f64, 0.0, 1.0);
    validate_range_f64(errors, "bloom.threshold", b.threshold as f64, 0.0, 1.0);
    validate_range(errors, "bloom.passes", b.passes, 1, 5);
}

pub(super) fn validate_background(errors: &mut Vec<String>, config: &OrreryConfig) {
    validate_range_f64(
        errors,
        "background.intensity",
        config.background.intensity as f64,
        0.0,
        1.0,
    );
    validate_color(errors, "background.color", &config.background.color);
}

pub(super) fn validate_orbit(errors: &mut Vec<String>, config: &OrreryConfig) {
    let o = &config.orbit;
    validate_range_f64(errors, "orbit.orbital_speed", o.orbital_speed, 0.0, 1.0);
    validate_range_f64(errors, "orbit.marker_width", o.marker_width as f64, 0.01, 5.0);
    validate_range(errors, "orbit.marker_segments", o.marker_segments, 8, 512);
    validate_color(errors, "orbit.marker_color", &o.marker_color);
}

pub(super) fn validate_lighting(errors: &mut Vec<String>, config: &OrreryConfig) {
    let l = &config.lighting;
    validate_range_f64(errors, "lighting.sun_intensity", l.sun_intensity as f64, 0.0, 10000.0);
    validate_range_f64(errors, "lighting.sun_range", l.sun_range as f64, 0.0, 100000.0);
    validate_range_f64(
        errors,
        "lighting.ambient_intensity",
        l.ambient_intensity as f64,
        0.0,
        10.0,
    );
    validate_color(errors, "lighting.sun_color", &l.sun_color);
    validate_color(errors, "lighting.ambient_color", &l.ambient_color);
}
