//! GPU copies of the scene's texture cache.

use std::collections::HashMap;

use tracing::debug;

use super::targets::{extent, sampler_entry, texture_entry};
use crate::textures::{TextureCache, TextureId};

/// Uploaded textures, one bind group each, plus a 1x1 white fallback
/// bound for untextured draws.
pub struct GpuTextures {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback: wgpu::BindGroup,
    uploaded: HashMap<TextureId, (wgpu::Texture, wgpu::BindGroup)>,
}

impl GpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material texture layout"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });

        // Repeat U for longitude wrap, clamp V at the poles
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = upload(device, queue, 1, 1, &[255, 255, 255, 255], "white fallback texture");
        let fallback = bind_group(device, &layout, &sampler, &white, "white fallback bind group");

        Self {
            layout,
            sampler,
            fallback,
            uploaded: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Upload any cache entries not yet on the GPU.
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, cache: &TextureCache) {
        for (id, image) in cache.iter() {
            if self.uploaded.contains_key(&id) {
                continue;
            }
            let texture = upload(device, queue, image.width(), image.height(), image.as_raw(), "material texture");
            let group = bind_group(device, &self.layout, &self.sampler, &texture, "material bind group");
            debug!(id = id.0, width = image.width(), height = image.height(), "texture uploaded");
            self.uploaded.insert(id, (texture, group));
        }
    }

    /// Bind group for `texture`, or the white fallback.
    pub fn bind_group(&self, texture: Option<TextureId>) -> &wgpu::BindGroup {
        texture
            .and_then(|id| self.uploaded.get(&id))
            .map(|(_, group)| group)
            .unwrap_or(&self.fallback)
    }
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    rgba: &[u8],
    label: &str,
) -> wgpu::Texture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: extent(width, height),
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        extent(width, height),
    );
    texture
}

fn bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    texture: &wgpu::Texture,
    label: &str,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
