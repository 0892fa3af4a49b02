//! Depth-tested mesh pipeline shared by the bright and base passes.
//!
//! Bind groups: 0 = [`FrameUniforms`], 1 = [`DrawUniforms`] at a dynamic
//! offset per draw, 2 = material texture.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use super::targets::{uniform_entry, DEPTH_FORMAT, HDR_FORMAT};
use super::textures::GpuTextures;
use super::uniforms::{DrawUniforms, FrameUniforms};
use crate::mesh::{MeshId, MeshVertex};
use crate::scene::Scene;
use crate::textures::TextureId;

/// One recorded draw: which slot of the draw buffer, which mesh, which texture.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub slot: u32,
    pub mesh: MeshId,
    pub texture: Option<TextureId>,
}

pub struct MeshPipeline {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u64,
    draw_capacity: u32,
    vertex_buffers: HashMap<MeshId, (wgpu::Buffer, u32)>,
}

impl MeshPipeline {
    pub fn new(device: &wgpu::Device, textures: &GpuTextures) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/mesh.wgsl").into()),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame uniforms layout"),
            entries: &[uniform_entry::<FrameUniforms>(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                false,
            )],
        });
        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw uniforms layout"),
            entries: &[uniform_entry::<DrawUniforms>(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                true,
            )],
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let draw_stride = align_to(std::mem::size_of::<DrawUniforms>() as u64, alignment);
        let draw_capacity = 32;
        let (draw_buffer, draw_bind_group) =
            create_draw_buffer(device, &draw_layout, draw_stride, draw_capacity);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh pipeline layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout, textures.layout()],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            // Rings are visible from both sides.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            draw_layout,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            draw_capacity,
            vertex_buffers: HashMap::new(),
        }
    }

    /// Upload vertex buffers for meshes added since the last call.
    pub fn sync_meshes(&mut self, device: &wgpu::Device, scene: &Scene) {
        for (id, mesh) in scene.meshes() {
            if self.vertex_buffers.contains_key(&id) || mesh.vertices.is_empty() {
                continue;
            }
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh vertex buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            self.vertex_buffers.insert(id, (buffer, mesh.vertices.len() as u32));
        }
    }

    /// Grow the per-draw buffer to hold at least `slots` draws.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, slots: u32) {
        if slots <= self.draw_capacity {
            return;
        }
        let capacity = slots.next_power_of_two();
        let (buffer, group) = create_draw_buffer(device, &self.draw_layout, self.draw_stride, capacity);
        self.draw_buffer = buffer;
        self.draw_bind_group = group;
        self.draw_capacity = capacity;
    }

    pub fn capacity(&self) -> u32 {
        self.draw_capacity
    }

    pub fn write_frame(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn write_draw(&self, queue: &wgpu::Queue, slot: u32, uniforms: &DrawUniforms) {
        queue.write_buffer(
            &self.draw_buffer,
            slot as u64 * self.draw_stride,
            bytemuck::bytes_of(uniforms),
        );
    }

    /// Record `draws` into an open pass.
    pub fn record(&self, pass: &mut wgpu::RenderPass<'_>, draws: &[DrawCall], textures: &GpuTextures) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for draw in draws {
            let Some((buffer, count)) = self.vertex_buffers.get(&draw.mesh) else {
                continue;
            };
            let offset = (draw.slot as u64 * self.draw_stride) as u32;
            pass.set_bind_group(1, &self.draw_bind_group, &[offset]);
            pass.set_bind_group(2, textures.bind_group(draw.texture), &[]);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..*count, 0..1);
        }
    }
}

fn align_to(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

fn create_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: u32,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draw uniforms"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("draw bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: std::num::NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64),
            }),
        }],
    });
    (buffer, group)
}
