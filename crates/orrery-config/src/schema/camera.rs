//! Camera configuration types.
//!
//! The camera is read, not owned, by the renderer: these values are
//! re-read every frame so a live config edit moves the view.

use serde::{Deserialize, Serialize};

/// Perspective camera looking at `target` from `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees (valid range: 10-120).
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 50.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
