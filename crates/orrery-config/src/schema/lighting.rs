//! Lighting configuration: one point light at the sun plus ambient.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub sun_color: String,
    /// Point light intensity (valid range: 0.0-10000.0).
    pub sun_intensity: f32,
    /// Distance at which the point light reaches zero. 0 = infinite.
    pub sun_range: f32,
    pub ambient_color: String,
    /// Ambient light intensity (valid range: 0.0-10.0).
    pub ambient_intensity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            sun_color: "#ffff00".into(),
            sun_intensity: 1000.0,
            sun_range: 100.0,
            ambient_color: "#ffffff".into(),
            ambient_intensity: 1.0,
        }
    }
}
