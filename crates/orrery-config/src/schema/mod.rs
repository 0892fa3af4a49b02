//! Configuration schema types for Orrery.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the default solar system.

mod background;
mod bloom;
mod bodies;
mod camera;
mod lighting;
mod orbit;
mod system;
mod window;

pub use background::*;
pub use bloom::*;
pub use bodies::*;
pub use camera::*;
pub use lighting::*;
pub use orbit::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Orrery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub bloom: BloomConfig,
    pub background: BackgroundConfig,
    pub orbit: OrbitConfig,
    pub lighting: LightingConfig,
    pub sun: SunConfig,
    pub bodies: Vec<BodyConfig>,
    pub logging: LoggingConfig,
    pub assets: AssetsConfig,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            bloom: BloomConfig::default(),
            background: BackgroundConfig::default(),
            orbit: OrbitConfig::default(),
            lighting: LightingConfig::default(),
            sun: SunConfig::default(),
            bodies: default_planets(),
            logging: LoggingConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
