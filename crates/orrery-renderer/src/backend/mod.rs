//! Pass backends: the compositor's view of "something that can draw".
//!
//! The compositor decides what each pass contains and in what order;
//! a backend only knows how to draw a scene into one of two targets,
//! run the bloom chain, and combine.

mod gpu;
mod software;

pub use gpu::GpuBackend;
pub use software::{Frame, SoftwareBackend};

use crate::gpu::{PhysicalSize, RendererError};
use crate::params::{BloomParams, LiveParams};
use crate::scene::Scene;

/// Which offscreen target a scene pass writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTarget {
    /// Source for the bloom chain. Cleared to black, no background.
    BrightSource,
    /// The normal view with background.
    Base,
}

pub trait PassBackend {
    /// Reallocate every render target at the new size.
    fn allocate(&mut self, width: u32, height: u32) -> Result<(), RendererError>;

    /// Current target size, if allocated.
    fn size(&self) -> Option<PhysicalSize>;

    /// Prepare a frame. `Ok(false)` means nothing can be drawn right now
    /// (for example, an outdated surface) and the frame should be skipped.
    fn begin_frame(&mut self, scene: &Scene, params: &LiveParams) -> Result<bool, RendererError>;

    /// Draw every visible renderable with its current draw material.
    fn draw_scene(
        &mut self,
        target: SceneTarget,
        scene: &Scene,
        params: &LiveParams,
    ) -> Result<(), RendererError>;

    /// Threshold and blur the bright source into the bloom target.
    /// `None` clears the bloom target instead.
    fn bloom(&mut self, bloom: Option<&BloomParams>) -> Result<(), RendererError>;

    /// Write `base + strength * bloom` to the output.
    fn combine(&mut self, strength: f32) -> Result<(), RendererError>;

    /// Finish and present the frame.
    fn end_frame(&mut self) -> Result<(), RendererError>;
}
