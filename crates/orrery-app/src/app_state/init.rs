//! Window and renderer initialization.

use std::sync::Arc;

use orrery_renderer::{FrameDriver, GpuBackend, LiveParams, SelectiveBloomCompositor};
use orrery_sim::{KinematicsUpdater, SystemClock};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::core::OrreryApp;
use crate::solar_system;

impl OrreryApp {
    /// Create the window, GPU backend, and frame driver.
    ///
    /// Returns `false` if anything failed; the caller should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let backend =
            match pollster::block_on(GpuBackend::new(window.clone(), self.config.window.vsync)) {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("Failed to initialize renderer: {e}");
                    return false;
                }
            };

        let size = window.inner_size();
        let system = solar_system::build(&self.config);
        let compositor = SelectiveBloomCompositor::with_size(backend, size.width, size.height);
        self.driver = Some(FrameDriver::new(
            Box::new(SystemClock::new(self.config.orbit.epoch)),
            system.registry,
            KinematicsUpdater::from_config(&self.config.orbit),
            system.scene,
            compositor,
            LiveParams::from_config(&self.config),
        ));

        tracing::info!(
            width = size.width,
            height = size.height,
            watching = self.reload.is_watching(),
            "window ready"
        );
        self.window = Some(window);
        true
    }
}
