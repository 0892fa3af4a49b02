//! Per-frame adjustable parameters.
//!
//! [`LiveParams`] is rebuilt from config whenever the config file changes
//! and read fresh by every pass of every frame.

use orrery_common::Color;
use orrery_config::schema::{BloomMode, OrreryConfig};

use crate::camera::Camera;

/// Largest blur half-width in texels. Matches the shader's weight array.
pub const MAX_BLUR_HALF_WIDTH: usize = 35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    pub mode: BloomMode,
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
    pub passes: u32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            mode: BloomMode::Selective,
            strength: 2.0,
            radius: 0.1,
            threshold: 0.1,
            passes: 2,
        }
    }
}

impl BloomParams {
    /// Gaussian sigma in texels for one blur iteration.
    pub fn sigma(&self) -> f32 {
        2.0 + self.radius.clamp(0.0, 1.0) * 30.0
    }

    /// Normalized one-sided Gaussian weights, center first.
    ///
    /// `weights[0] + 2 * sum(weights[1..]) == 1`.
    pub fn blur_weights(&self) -> Vec<f32> {
        let sigma = self.sigma();
        let half = ((sigma * 3.0).ceil() as usize).min(MAX_BLUR_HALF_WIDTH - 1);
        let mut weights: Vec<f32> = (0..=half)
            .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
            .collect();
        let total = weights[0] + 2.0 * weights[1..].iter().sum::<f32>();
        for w in &mut weights {
            *w /= total;
        }
        weights
    }

    /// Strength the combine pass applies.
    pub fn effective_strength(&self) -> f32 {
        match self.mode {
            BloomMode::Off => 0.0,
            _ => self.strength,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundParams {
    /// Linear RGBA used when no starfield texture is available.
    pub color: [f32; 4],
    pub intensity: f32,
}

impl Default for BackgroundParams {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
            intensity: 0.5,
        }
    }
}

/// Point light at the sun plus ambient fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingParams {
    pub sun_position: [f32; 3],
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    /// Distance at which the light fades to zero. 0 disables the cutoff.
    pub sun_range: f32,
    /// Ambient color premultiplied by intensity.
    pub ambient: [f32; 3],
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            sun_position: [0.0; 3],
            sun_color: [1.0, 1.0, 0.0],
            sun_intensity: 1000.0,
            sun_range: 100.0,
            ambient: [1.0; 3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LiveParams {
    pub camera: Camera,
    pub bloom: BloomParams,
    pub background: BackgroundParams,
    pub lighting: LightingParams,
}

impl LiveParams {
    pub fn from_config(config: &OrreryConfig) -> Self {
        let rgb = |hex: &str, fallback: [f32; 4]| {
            Color::from_hex(hex)
                .map(|c| c.to_linear())
                .unwrap_or(fallback)
        };

        let sun = rgb(&config.lighting.sun_color, [1.0, 1.0, 0.0, 1.0]);
        let ambient = rgb(&config.lighting.ambient_color, [1.0; 4]);
        let ambient_intensity = config.lighting.ambient_intensity;

        Self {
            camera: Camera::from_config(&config.camera),
            bloom: BloomParams {
                mode: config.bloom.mode,
                strength: config.bloom.strength,
                radius: config.bloom.radius,
                threshold: config.bloom.threshold,
                passes: config.bloom.passes.clamp(1, 5),
            },
            background: BackgroundParams {
                color: rgb(&config.background.color, [0.0, 0.0, 0.0, 1.0]),
                intensity: config.background.intensity,
            },
            lighting: LightingParams {
                sun_position: [0.0; 3],
                sun_color: [sun[0], sun[1], sun[2]],
                sun_intensity: config.lighting.sun_intensity,
                sun_range: config.lighting.sun_range,
                ambient: [
                    ambient[0] * ambient_intensity,
                    ambient[1] * ambient_intensity,
                    ambient[2] * ambient_intensity,
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config() {
        let p = LiveParams::from_config(&OrreryConfig::default());
        assert_eq!(p.camera.position, [0.0, 0.0, 50.0]);
        assert_eq!(p.bloom.mode, BloomMode::Selective);
        assert!((p.bloom.strength - 2.0).abs() < f32::EPSILON);
        assert!((p.background.intensity - 0.5).abs() < f32::EPSILON);
        assert!((p.lighting.sun_color[0] - 1.0).abs() < 1e-5);
        assert!(p.lighting.sun_color[2].abs() < 1e-5);
    }

    #[test]
    fn camera_edits_flow_through() {
        let mut config = OrreryConfig::default();
        config.camera.position = [5.0, 10.0, 20.0];
        config.bloom.strength = 0.0;
        let p = LiveParams::from_config(&config);
        assert_eq!(p.camera.position, [5.0, 10.0, 20.0]);
        assert_eq!(p.bloom.strength, 0.0);
    }

    #[test]
    fn passes_are_clamped() {
        let mut config = OrreryConfig::default();
        config.bloom.passes = 12;
        assert_eq!(LiveParams::from_config(&config).bloom.passes, 5);
    }

    #[test]
    fn blur_weights_are_normalized() {
        for radius in [0.0, 0.1, 0.5, 1.0] {
            let bloom = BloomParams {
                radius,
                ..BloomParams::default()
            };
            let w = bloom.blur_weights();
            let total = w[0] + 2.0 * w[1..].iter().sum::<f32>();
            assert!((total - 1.0).abs() < 1e-5, "radius {radius}: {total}");
            assert!(w.len() <= MAX_BLUR_HALF_WIDTH);
            assert!(w.windows(2).all(|p| p[0] >= p[1]));
        }
    }

    #[test]
    fn off_mode_has_zero_strength() {
        let bloom = BloomParams {
            mode: BloomMode::Off,
            ..BloomParams::default()
        };
        assert_eq!(bloom.effective_strength(), 0.0);
        assert_eq!(BloomParams::default().effective_strength(), 2.0);
    }
}
