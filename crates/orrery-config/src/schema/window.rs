//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Initial window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial logical width (valid range: 320-7680).
    pub width: u32,
    /// Initial logical height (valid range: 240-4320).
    pub height: u32,
    /// Present with vsync (`Fifo`) instead of `AutoNoVsync`.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".into(),
            width: 1280,
            height: 800,
            vsync: true,
        }
    }
}
