//! CPU implementation of [`PassBackend`].
//!
//! Meshes are rasterized with a depth buffer using each material's flat
//! color; lighting and mesh textures are ignored. Threshold, blur, and
//! combine follow the GPU shaders.

mod frame;
mod post;
mod raster;

pub use frame::Frame;

use tracing::trace;

use super::{PassBackend, SceneTarget};
use crate::gpu::{PhysicalSize, RendererError};
use crate::helpers::log_first_frame;
use crate::params::{BloomParams, LiveParams};
use crate::scene::Scene;

/// Largest target edge the software rasterizer accepts.
pub const MAX_SOFTWARE_DIMENSION: u32 = 8192;

#[derive(Debug, Default)]
pub struct SoftwareBackend {
    size: Option<PhysicalSize>,
    bright: Frame,
    base: Frame,
    bloom: Frame,
    output: Frame,
    depth: Vec<f32>,
    frames_presented: u64,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bright-pass scene render, before threshold and blur.
    pub fn bright_source(&self) -> &Frame {
        &self.bright
    }

    pub fn base(&self) -> &Frame {
        &self.base
    }

    /// Blurred bloom contribution.
    pub fn bloom_target(&self) -> &Frame {
        &self.bloom
    }

    /// Final combined image.
    pub fn output(&self) -> &Frame {
        &self.output
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl PassBackend for SoftwareBackend {
    fn allocate(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        if width == 0
            || height == 0
            || width > MAX_SOFTWARE_DIMENSION
            || height > MAX_SOFTWARE_DIMENSION
        {
            return Err(RendererError::InvalidTargetSize {
                width,
                height,
                max: MAX_SOFTWARE_DIMENSION,
            });
        }

        self.bright = Frame::new(width, height);
        self.base = Frame::new(width, height);
        self.bloom = Frame::new(width, height);
        self.output = Frame::new(width, height);
        self.depth = vec![1.0; (width * height) as usize];
        self.size = Some(PhysicalSize::new(width, height));
        Ok(())
    }

    fn size(&self) -> Option<PhysicalSize> {
        self.size
    }

    fn begin_frame(&mut self, _scene: &Scene, _params: &LiveParams) -> Result<bool, RendererError> {
        Ok(self.size.is_some())
    }

    fn draw_scene(
        &mut self,
        target: SceneTarget,
        scene: &Scene,
        params: &LiveParams,
    ) -> Result<(), RendererError> {
        let size = self.size.ok_or(RendererError::InvalidTargetSize {
            width: 0,
            height: 0,
            max: MAX_SOFTWARE_DIMENSION,
        })?;
        let view_proj = params.camera.view_proj(size.aspect());

        let color = match target {
            SceneTarget::BrightSource => {
                self.bright.fill([0.0, 0.0, 0.0, 1.0]);
                &mut self.bright
            }
            SceneTarget::Base => {
                raster::draw_background(&mut self.base, scene, &params.background);
                &mut self.base
            }
        };
        self.depth.fill(1.0);

        let triangles = raster::draw_renderables(color, &mut self.depth, scene, &view_proj);
        trace!(?target, triangles, "software scene pass");
        Ok(())
    }

    fn bloom(&mut self, bloom: Option<&BloomParams>) -> Result<(), RendererError> {
        match bloom {
            Some(params) => {
                let mut out = post::threshold(&self.bright, params.threshold);
                let weights = params.blur_weights();
                for _ in 0..params.passes.max(1) {
                    out = post::blur(&out, &weights, post::Axis::Horizontal);
                    out = post::blur(&out, &weights, post::Axis::Vertical);
                }
                self.bloom = out;
            }
            None => self.bloom.fill([0.0, 0.0, 0.0, 1.0]),
        }
        Ok(())
    }

    fn combine(&mut self, strength: f32) -> Result<(), RendererError> {
        self.output = post::combine(&self.base, &self.bloom, strength);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RendererError> {
        self.frames_presented += 1;
        log_first_frame(self.output.width(), self.output.height(), &"software");
        Ok(())
    }
}
