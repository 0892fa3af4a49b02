//! Background (starfield) configuration.

use serde::{Deserialize, Serialize};

/// Fullscreen background drawn behind the scene in the base pass only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Starfield texture path, relative to the asset root. Empty = none.
    pub texture: String,
    /// Brightness multiplier for the texture (valid range: 0.0-1.0).
    pub intensity: f32,
    /// Clear color used when the texture is missing.
    pub color: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            texture: "starsmap.jpg".into(),
            intensity: 0.5,
            color: "#000000".into(),
        }
    }
}
