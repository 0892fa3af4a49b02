//! Config reload polling and redraw scheduling.

use orrery_config::OrreryConfig;
use orrery_renderer::LiveParams;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::OrreryApp;

impl OrreryApp {
    /// Pick up config edits, then schedule the next frame.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(config) = self.reload.poll() {
            self.apply_config(config);
        }
        self.request_redraw();
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    /// Apply the live-tunable parts of a reloaded config.
    ///
    /// Bodies, textures, and window settings are read once at startup.
    pub(super) fn apply_config(&mut self, config: OrreryConfig) {
        if let Some(ref mut driver) = self.driver {
            driver.set_params(LiveParams::from_config(&config));
            driver
                .updater_mut()
                .set_orbital_speed(config.orbit.orbital_speed);
        }
        tracing::info!(
            strength = config.bloom.strength,
            mode = ?config.bloom.mode,
            "config applied"
        );
        self.config = config;
    }
}
