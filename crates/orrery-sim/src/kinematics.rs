//! Orbital kinematics.
//!
//! Each body moves on a circle of radius `d` in the XZ plane:
//!
//! ```text
//! angle = s * t_ms * k
//! x = d * cos(angle), y = 0, z = d * sin(angle)
//! ```
//!
//! Positions are computed in `f64` and narrowed to `f32` only when handed
//! to the scene, since `t_ms` can be a Unix timestamp.

use orrery_common::RenderableId;
use orrery_config::schema::{OrbitConfig, SpinMode};
use tracing::debug;

use crate::bodies::BodyRegistry;

/// Frame length the per-frame spin rates were tuned against (60 Hz).
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// Receives placements computed by the updater.
///
/// Both methods return `false` when `id` no longer resolves to a
/// renderable; the updater skips it and moves on.
pub trait TransformSink {
    fn set_position(&mut self, id: RenderableId, position: [f32; 3]) -> bool;
    fn set_spin(&mut self, id: RenderableId, angle: f32) -> bool;
}

/// Position on the orbit circle after `t_ms` milliseconds.
pub fn orbital_position(distance: f64, rate_factor: f64, orbital_speed: f64, t_ms: f64) -> [f64; 3] {
    let angle = orbital_speed * t_ms * rate_factor;
    [distance * angle.cos(), 0.0, distance * angle.sin()]
}

/// Self-rotation angle under [`SpinMode::Time`].
pub fn spin_angle(spin_rate: f64, t_ms: f64) -> f64 {
    spin_rate * t_ms / NOMINAL_FRAME_MS
}

/// Writes every body's placement into a [`TransformSink`] each frame.
#[derive(Debug)]
pub struct KinematicsUpdater {
    orbital_speed: f64,
    spin_mode: SpinMode,
    /// Frames presented so far; drives [`SpinMode::Frame`].
    frames_presented: u64,
}

impl KinematicsUpdater {
    pub fn new(orbital_speed: f64, spin_mode: SpinMode) -> Self {
        Self {
            orbital_speed,
            spin_mode,
            frames_presented: 0,
        }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self::new(config.orbital_speed, config.spin_mode)
    }

    pub fn orbital_speed(&self) -> f64 {
        self.orbital_speed
    }

    pub fn set_orbital_speed(&mut self, orbital_speed: f64) {
        self.orbital_speed = orbital_speed;
    }

    pub fn spin_mode(&self) -> SpinMode {
        self.spin_mode
    }

    /// Count a frame that reached the screen.
    ///
    /// Under [`SpinMode::Frame`] each body turns by `spin_rate` once per
    /// presented frame; updates for skipped frames repeat the same angle.
    pub fn frame_presented(&mut self) {
        self.frames_presented += 1;
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Place every registered body for elapsed time `t_ms`.
    ///
    /// Returns the number of renderables that accepted a placement.
    pub fn update(&mut self, registry: &BodyRegistry, t_ms: f64, sink: &mut impl TransformSink) -> usize {
        let mut placed = 0;

        for body in registry.iter() {
            let [x, y, z] =
                orbital_position(body.distance(), body.rate_factor(), self.orbital_speed, t_ms);
            let position = [x as f32, y as f32, z as f32];

            let spin = match self.spin_mode {
                SpinMode::Time => spin_angle(body.spin_rate(), t_ms),
                SpinMode::Frame => body.spin_rate() * (self.frames_presented + 1) as f64,
            };
            // Only the fractional turn matters and f32 loses it on large angles.
            let spin = spin.rem_euclid(std::f64::consts::TAU) as f32;

            if sink.set_position(body.mesh(), position) && sink.set_spin(body.mesh(), spin) {
                placed += 1;
            } else {
                debug!(body = body.name(), mesh = %body.mesh(), "body mesh no longer in scene, skipping");
            }

            if let Some(ring) = body.ring() {
                if sink.set_position(ring, position) {
                    placed += 1;
                } else {
                    debug!(body = body.name(), %ring, "ring no longer in scene, skipping");
                }
            }
        }

        placed
    }
}
