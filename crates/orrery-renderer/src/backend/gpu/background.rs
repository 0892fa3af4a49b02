//! Fullscreen starfield drawn at the start of the base pass.

use super::targets::{fullscreen_pipeline, uniform_entry, DEPTH_FORMAT, HDR_FORMAT};
use super::textures::GpuTextures;
use super::uniforms::BackgroundUniforms;
use crate::textures::TextureId;

pub struct BackgroundPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl BackgroundPipeline {
    pub fn new(device: &wgpu::Device, textures: &GpuTextures) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/background.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background bind group layout"),
            entries: &[uniform_entry::<BackgroundUniforms>(0, wgpu::ShaderStages::FRAGMENT, false)],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("background uniforms"),
            size: std::mem::size_of::<BackgroundUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background pipeline layout"),
            bind_group_layouts: &[&layout, textures.layout()],
            push_constant_ranges: &[],
        });

        // Shares the base pass depth attachment but never tests or writes it.
        let depth = wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };
        let pipeline = fullscreen_pipeline(
            device,
            "background pipeline",
            &pipeline_layout,
            &shader,
            "fs_main",
            HDR_FORMAT,
            Some(depth),
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &BackgroundUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn record(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        textures: &GpuTextures,
        starfield: Option<TextureId>,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_bind_group(1, textures.bind_group(starfield), &[]);
        pass.draw(0..3, 0..1);
    }
}
