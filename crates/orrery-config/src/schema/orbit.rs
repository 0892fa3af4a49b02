//! Orbital motion configuration.

use serde::{Deserialize, Serialize};

/// How self-rotation advances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpinMode {
    /// Spin angle is a pure function of elapsed time.
    #[default]
    Time,
    /// Spin angle grows by a fixed step each presented frame. Skipped
    /// frames do not advance it.
    Frame,
}

/// What "elapsed time zero" means.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockEpoch {
    /// Elapsed time counts from application start.
    #[default]
    Start,
    /// Elapsed time counts from the Unix epoch in wall-clock milliseconds.
    Unix,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Global angular speed per millisecond, multiplied by each body's rate factor.
    pub orbital_speed: f64,
    pub spin_mode: SpinMode,
    pub epoch: ClockEpoch,
    /// Draw the decorative orbit rings.
    pub show_markers: bool,
    pub marker_color: String,
    /// Ring width in scene units (valid range: 0.01-5.0).
    pub marker_width: f32,
    /// Segments per ring (valid range: 8-512).
    pub marker_segments: u32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            orbital_speed: 0.005,
            spin_mode: SpinMode::Time,
            epoch: ClockEpoch::Start,
            show_markers: true,
            marker_color: "#d3d3d3".into(),
            marker_width: 0.1,
            marker_segments: 124,
        }
    }
}
