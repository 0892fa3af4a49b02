//! Frame rendering logic.

use orrery_renderer::RendererError;

use super::core::OrreryApp;

impl OrreryApp {
    /// Render a single frame through the driver.
    pub(super) fn render_frame(&mut self) {
        let Some(ref mut driver) = self.driver else {
            return;
        };
        match driver.tick() {
            Ok(_) => {}
            // Materials may be left substituted; drawing on would be wrong.
            Err(e @ RendererError::SubstitutionLeak { .. }) => panic!("{e}"),
            Err(e) => tracing::warn!("Render error: {e}"),
        }
    }
}
