//! Threshold + separable Gaussian blur chain.
//!
//! threshold: bright source → ping
//! then `passes` times: horizontal ping → pong, vertical pong → ping.
//! The result is read from ping.

use super::targets::{create_color_target, fullscreen_pipeline, sampler_entry, texture_entry, uniform_entry, HDR_FORMAT};
use super::uniforms::BloomUniforms;

pub struct BloomPipeline {
    pipeline_threshold: wgpu::RenderPipeline,
    pipeline_h: wgpu::RenderPipeline,
    pipeline_v: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group_threshold: wgpu::BindGroup,
    bind_group_h: wgpu::BindGroup,
    bind_group_v: wgpu::BindGroup,
    _ping_texture: wgpu::Texture,
    _pong_texture: wgpu::Texture,
    view_ping: wgpu::TextureView,
    view_pong: wgpu::TextureView,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl BloomPipeline {
    /// `source_view` is the bright-source target.
    pub fn new(device: &wgpu::Device, source_view: &wgpu::TextureView, width: u32, height: u32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bloom shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/bloom.wgsl").into()),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("bloom sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bloom uniforms"),
            size: std::mem::size_of::<BloomUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom bind group layout"),
            entries: &[
                uniform_entry::<BloomUniforms>(0, wgpu::ShaderStages::FRAGMENT, false),
                texture_entry(1),
                sampler_entry(2),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bloom pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let create_pipeline = |label: &str, entry_point: &str| {
            fullscreen_pipeline(device, label, &pipeline_layout, &shader, entry_point, HDR_FORMAT, None)
        };
        let pipeline_threshold = create_pipeline("bloom threshold pipeline", "fs_threshold");
        let pipeline_h = create_pipeline("bloom h pipeline", "fs_blur_h");
        let pipeline_v = create_pipeline("bloom v pipeline", "fs_blur_v");

        let (texture_ping, view_ping) = create_color_target(device, width, height, "bloom ping");
        let (texture_pong, view_pong) = create_color_target(device, width, height, "bloom pong");

        let bind = |view: &wgpu::TextureView, label: &str| {
            Self::create_bind_group(device, &bind_group_layout, &uniform_buffer, view, &sampler, label)
        };
        let bind_group_threshold = bind(source_view, "bloom bind group threshold");
        let bind_group_h = bind(&view_ping, "bloom bind group h");
        let bind_group_v = bind(&view_pong, "bloom bind group v");

        Self {
            pipeline_threshold,
            pipeline_h,
            pipeline_v,
            uniform_buffer,
            bind_group_threshold,
            bind_group_h,
            bind_group_v,
            _ping_texture: texture_ping,
            _pong_texture: texture_pong,
            view_ping,
            view_pong,
            bind_group_layout,
            sampler,
        }
    }

    /// Recreate textures and bind groups after a resize.
    pub fn resize(&mut self, device: &wgpu::Device, source_view: &wgpu::TextureView, width: u32, height: u32) {
        let (texture_ping, view_ping) = create_color_target(device, width, height, "bloom ping");
        let (texture_pong, view_pong) = create_color_target(device, width, height, "bloom pong");

        let bind = |view: &wgpu::TextureView, label: &str| {
            Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.uniform_buffer,
                view,
                &self.sampler,
                label,
            )
        };
        let bind_group_threshold = bind(source_view, "bloom bind group threshold");
        let bind_group_h = bind(&view_ping, "bloom bind group h");
        let bind_group_v = bind(&view_pong, "bloom bind group v");

        self.bind_group_threshold = bind_group_threshold;
        self.bind_group_h = bind_group_h;
        self.bind_group_v = bind_group_v;
        self._ping_texture = texture_ping;
        self._pong_texture = texture_pong;
        self.view_ping = view_ping;
        self.view_pong = view_pong;
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &BloomUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Record threshold then `passes` rounds of horizontal + vertical blur.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, passes: u32) {
        Self::fullscreen_pass(
            encoder,
            "bloom threshold pass",
            &self.view_ping,
            &self.pipeline_threshold,
            &self.bind_group_threshold,
        );
        for _ in 0..passes.max(1) {
            Self::fullscreen_pass(encoder, "bloom h pass", &self.view_pong, &self.pipeline_h, &self.bind_group_h);
            Self::fullscreen_pass(encoder, "bloom v pass", &self.view_ping, &self.pipeline_v, &self.bind_group_v);
        }
    }

    /// Clear the output so the combine adds nothing.
    pub fn clear(&self, encoder: &mut wgpu::CommandEncoder) {
        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("bloom clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view_ping,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
    }

    /// The blurred result.
    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.view_ping
    }

    fn fullscreen_pass(
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
        bind_group: &wgpu::BindGroup,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        texture_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
