//! Core application struct.

use std::sync::Arc;

use orrery_config::{OrreryConfig, ReloadManager};
use orrery_renderer::{FrameDriver, GpuBackend};
use winit::window::Window;

/// The windowed application. Everything GPU-backed is created lazily
/// in `resumed`.
pub struct OrreryApp {
    pub(super) config: OrreryConfig,
    pub(super) reload: ReloadManager,
    pub(super) window: Option<Arc<Window>>,
    pub(super) driver: Option<FrameDriver<GpuBackend>>,
}

impl OrreryApp {
    pub fn new(config: OrreryConfig, reload: ReloadManager) -> Self {
        Self {
            config,
            reload,
            window: None,
            driver: None,
        }
    }

    pub(super) fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
