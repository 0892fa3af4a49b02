//! Sun and planet configuration.
//!
//! `bodies` is an array of tables in TOML. Supplying it replaces the
//! whole default planet list, so a config can describe any system.

use serde::{Deserialize, Serialize};

/// The central light-emitting body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub radius: f32,
    pub texture: String,
    /// Flat color used when the texture is missing.
    pub color: String,
    /// Self-rotation rate in radians per nominal frame.
    pub spin_rate: f64,
    /// Whether the sun feeds the bloom chain.
    pub bloom: bool,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            texture: "sunmap.jpg".into(),
            color: "#ffcc33".into(),
            spin_rate: 0.0,
            bloom: true,
        }
    }
}

/// A flat ring attached to a body (Saturn's ring).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Inner radius as a multiple of the body radius.
    pub inner_scale: f32,
    /// Outer radius as a multiple of the body radius.
    pub outer_scale: f32,
    /// Tilt about the X axis, in radians.
    pub tilt: f32,
    pub texture: String,
    pub color: String,
    /// Segments around the ring (valid range: 8-512).
    pub segments: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            inner_scale: 1.8,
            outer_scale: 2.5,
            tilt: -10.0,
            texture: "saturnRingmap.png".into(),
            color: "#c8b27a".into(),
            segments: 124,
        }
    }
}

/// One orbiting body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub name: String,
    pub radius: f32,
    /// Orbit radius around the origin.
    pub distance: f64,
    /// Multiplier on the global orbital speed.
    pub rate_factor: f64,
    /// Self-rotation rate in radians per nominal frame.
    pub spin_rate: f64,
    pub texture: String,
    pub bump_texture: String,
    /// Flat color used when the texture is missing.
    pub color: String,
    pub bloom: bool,
    pub ring: Option<RingConfig>,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: "body".into(),
            radius: 1.0,
            distance: 10.0,
            rate_factor: 0.0,
            spin_rate: 0.0,
            texture: String::new(),
            bump_texture: String::new(),
            color: "#808080".into(),
            bloom: false,
            ring: None,
        }
    }
}

fn planet(
    name: &str,
    radius: f32,
    distance: f64,
    rate_factor: f64,
    spin_rate: f64,
    bump_ext: &str,
    color: &str,
) -> BodyConfig {
    BodyConfig {
        name: name.into(),
        radius,
        distance,
        rate_factor,
        spin_rate,
        texture: format!("{name}map.jpg"),
        bump_texture: format!("{name}bump.{bump_ext}"),
        color: color.into(),
        bloom: false,
        ring: None,
    }
}

/// The eight planets of the default scene.
pub fn default_planets() -> Vec<BodyConfig> {
    let mut saturn = planet("saturn", 1.5, 38.0, 0.002, 0.003, "png", "#e3d9a6");
    saturn.ring = Some(RingConfig::default());

    vec![
        planet("mercury", 0.5, 10.0, 0.27, 0.01, "jpg", "#8c8c8c"),
        planet("venus", 0.7, 15.0, 0.11, 0.008, "jpg", "#e6c87a"),
        planet("earth", 0.7, 20.0, 0.07, 0.005, "jpg", "#2f6ab5"),
        planet("mars", 0.6, 25.0, 0.035, 0.005, "jpg", "#c1440e"),
        planet("jupiter", 2.0, 31.0, 0.006, 0.004, "png", "#d8ca9d"),
        saturn,
        planet("uranus", 1.0, 43.0, 0.0009, 0.003, "png", "#9fe3e6"),
        planet("neptune", 1.0, 48.0, 0.0005, 0.003, "png", "#3f54ba"),
    ]
}
