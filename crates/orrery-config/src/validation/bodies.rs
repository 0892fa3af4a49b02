//! Sun and body list validation.

use std::collections::HashSet;

use super::helpers::{validate_color, validate_range, validate_range_f64};
use crate::schema::OrreryConfig;

pub(super) fn validate_sun(errors: &mut Vec<String>, config: &OrreryConfig) {
    validate_range_f64(errors, "sun.radius", config.sun.radius as f64, 0.01, 1000.0);
    validate_color(errors, "sun.color", &config.sun.color);
}

pub(super) fn validate_bodies(errors: &mut Vec<String>, config: &OrreryConfig) {
    let mut seen = HashSet::new();

    for body in &config.bodies {
        let prefix = format!("bodies.{}", body.name);

        if body.name.is_empty() {
            errors.push("bodies: name must not be empty".into());
        } else if !seen.insert(body.name.as_str()) {
            errors.push(format!("{prefix}: duplicate body name"));
        }

        validate_range_f64(errors, &format!("{prefix}.radius"), body.radius as f64, 0.01, 1000.0);
        validate_range_f64(errors, &format!("{prefix}.distance"), body.distance, 0.0, 100000.0);
        if !body.rate_factor.is_finite() {
            errors.push(format!("{prefix}.rate_factor must be finite"));
        }
        if !body.spin_rate.is_finite() {
            errors.push(format!("{prefix}.spin_rate must be finite"));
        }
        validate_color(errors, &format!("{prefix}.color"), &body.color);

        if let Some(ring) = &body.ring {
            if !(ring.inner_scale > 0.0 && ring.outer_scale > ring.inner_scale) {
                errors.push(format!(
                    "{prefix}.ring: outer_scale {} must exceed inner_scale {} > 0",
                    ring.outer_scale, ring.inner_scale
                ));
            }
            validate_range(errors, &format!("{prefix}.ring.segments"), ring.segments, 8, 512);
            validate_color(errors, &format!("{prefix}.ring.color"), &ring.color);
        }
    }
}
