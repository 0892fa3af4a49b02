//! wgpu implementation of [`PassBackend`].
//!
//! One command encoder per frame. Scene passes render into `Rgba16Float`
//! targets sharing a depth buffer; the bloom chain and the combine pass
//! are fullscreen triangles. The combine writes the window surface.

mod background;
mod bloom;
mod composite;
mod mesh_pipeline;
mod targets;
mod textures;
mod uniforms;

use std::sync::Arc;

use tracing::{debug, warn};
use winit::window::Window;

use background::BackgroundPipeline;
use bloom::BloomPipeline;
use composite::CompositePipeline;
use mesh_pipeline::{DrawCall, MeshPipeline};
use targets::RenderTargets;
use textures::GpuTextures;
use uniforms::{BackgroundUniforms, BloomUniforms, DrawUniforms, FrameUniforms};

use super::{PassBackend, SceneTarget};
use crate::gpu::{GpuContext, PhysicalSize, RendererError};
use crate::helpers::log_first_frame;
use crate::params::{BloomParams, LiveParams};
use crate::scene::Scene;

/// Work recorded for the frame in progress.
struct FrameInFlight {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
    next_slot: u32,
}

pub struct GpuBackend {
    ctx: GpuContext,
    targets: RenderTargets,
    textures: GpuTextures,
    mesh: MeshPipeline,
    background: BackgroundPipeline,
    bloom: BloomPipeline,
    composite: CompositePipeline,
    frame: Option<FrameInFlight>,
}

impl GpuBackend {
    /// Create the device, surface, and every pipeline at the window's size.
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RendererError> {
        let ctx = GpuContext::new(window, vsync).await?;
        let PhysicalSize { width, height } = ctx.size;

        let targets = RenderTargets::new(&ctx.device, width, height);
        let textures = GpuTextures::new(&ctx.device, &ctx.queue);
        let mesh = MeshPipeline::new(&ctx.device, &textures);
        let background = BackgroundPipeline::new(&ctx.device, &textures);
        let bloom = BloomPipeline::new(&ctx.device, &targets.bright_view, width, height);
        let composite = CompositePipeline::new(
            &ctx.device,
            &targets.base_view,
            bloom.output_view(),
            ctx.format(),
        );

        Ok(Self {
            ctx,
            targets,
            textures,
            mesh,
            background,
            bloom,
            composite,
            frame: None,
        })
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }
}

fn in_flight(frame: &mut Option<FrameInFlight>) -> Result<&mut FrameInFlight, RendererError> {
    frame
        .as_mut()
        .ok_or_else(|| RendererError::SurfaceError("no frame in progress".into()))
}

impl PassBackend for GpuBackend {
    fn allocate(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        let max = self.ctx.max_target_dimension();
        if width == 0 || height == 0 || width > max || height > max {
            return Err(RendererError::InvalidTargetSize { width, height, max });
        }

        self.ctx.resize(width, height);
        let device = &self.ctx.device;
        self.targets = RenderTargets::new(device, width, height);
        self.bloom.resize(device, &self.targets.bright_view, width, height);
        self.composite
            .resize(device, &self.targets.base_view, self.bloom.output_view());
        debug!(width, height, "render targets allocated");
        Ok(())
    }

    fn size(&self) -> Option<PhysicalSize> {
        Some(PhysicalSize::new(self.targets.width, self.targets.height))
    }

    fn begin_frame(&mut self, scene: &Scene, params: &LiveParams) -> Result<bool, RendererError> {
        let surface_texture = match self.ctx.current_texture() {
            Ok(texture) => texture,
            Err(e @ wgpu::SurfaceError::OutOfMemory) => return Err(e.into()),
            Err(e) => {
                warn!("surface unavailable ({e}), reconfiguring");
                self.ctx.reconfigure();
                return Ok(false);
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.ctx.device;
        let queue = &self.ctx.queue;
        self.mesh.sync_meshes(device, scene);
        self.textures.sync(device, queue, scene.textures());
        // One slot per renderable for each of the two scene passes.
        self.mesh.ensure_capacity(device, (scene.len() as u32 * 2).max(1));

        let aspect = PhysicalSize::new(self.targets.width, self.targets.height).aspect();
        self.mesh.write_frame(
            queue,
            &FrameUniforms::new(
                params.camera.view_proj(aspect),
                params.camera.position,
                &params.lighting,
            ),
        );
        self.background.update_uniforms(
            queue,
            &BackgroundUniforms::new(&params.background, scene.background().is_some()),
        );

        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });
        self.frame = Some(FrameInFlight {
            encoder,
            surface_texture,
            surface_view,
            next_slot: 0,
        });
        Ok(true)
    }

    fn draw_scene(
        &mut self,
        target: SceneTarget,
        scene: &Scene,
        params: &LiveParams,
    ) -> Result<(), RendererError> {
        let frame = in_flight(&mut self.frame)?;

        let mut draws = Vec::with_capacity(scene.len());
        for renderable in scene.iter().filter(|r| r.visible) {
            if frame.next_slot >= self.mesh.capacity() {
                warn!("draw buffer full, dropping remaining draws");
                break;
            }
            let material = renderable.draw_material();
            let slot = frame.next_slot;
            frame.next_slot += 1;
            self.mesh.write_draw(
                &self.ctx.queue,
                slot,
                &DrawUniforms::new(renderable.transform.model_matrix(), material),
            );
            draws.push(DrawCall {
                slot,
                mesh: renderable.mesh(),
                texture: material.texture,
            });
        }

        let (view, clear) = match target {
            SceneTarget::BrightSource => (&self.targets.bright_view, wgpu::Color::BLACK),
            SceneTarget::Base => {
                let c = params.background.color;
                let k = params.background.intensity as f64;
                (
                    &self.targets.base_view,
                    wgpu::Color {
                        r: c[0] as f64 * k,
                        g: c[1] as f64 * k,
                        b: c[2] as f64 * k,
                        a: 1.0,
                    },
                )
            }
        };

        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(match target {
                SceneTarget::BrightSource => "bright source pass",
                SceneTarget::Base => "base pass",
            }),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if target == SceneTarget::Base {
            self.background
                .record(&mut pass, &self.textures, scene.background());
        }
        self.mesh.record(&mut pass, &draws, &self.textures);
        Ok(())
    }

    fn bloom(&mut self, bloom: Option<&BloomParams>) -> Result<(), RendererError> {
        let (width, height) = (self.targets.width, self.targets.height);
        if let Some(params) = bloom {
            self.bloom
                .update_uniforms(&self.ctx.queue, &BloomUniforms::new(params, width, height));
        }

        let frame = in_flight(&mut self.frame)?;
        match bloom {
            Some(params) => self.bloom.render(&mut frame.encoder, params.passes),
            None => self.bloom.clear(&mut frame.encoder),
        }
        Ok(())
    }

    fn combine(&mut self, strength: f32) -> Result<(), RendererError> {
        self.composite.update_uniforms(&self.ctx.queue, strength);
        let frame = in_flight(&mut self.frame)?;
        self.composite.render(&mut frame.encoder, &frame.surface_view);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RendererError> {
        let frame = self
            .frame
            .take()
            .ok_or_else(|| RendererError::SurfaceError("no frame in progress".into()))?;
        self.ctx.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
        log_first_frame(self.targets.width, self.targets.height, &self.ctx.format());
        Ok(())
    }
}
