//! GPU uniform layouts. Field order and padding match the WGSL structs.

use crate::matrix::Mat4;
use crate::params::{BackgroundParams, BloomParams, LightingParams};
use crate::scene::{Material, Shading};

/// Blur weights carried by [`BloomUniforms`], packed four per `vec4`.
pub const BLUR_WEIGHT_VEC4S: usize = 9;

/// Per-frame camera and lighting, bind group 0 of the mesh pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: Mat4,
    pub camera_position: [f32; 4],
    /// xyz = sun position, w = light range (0 = unbounded).
    pub sun_position: [f32; 4],
    /// rgb = light color, w = intensity.
    pub sun_color: [f32; 4],
    /// rgb = ambient premultiplied by intensity.
    pub ambient: [f32; 4],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, camera_position: [f32; 3], lighting: &LightingParams) -> Self {
        let [px, py, pz] = lighting.sun_position;
        let [r, g, b] = lighting.sun_color;
        let [ar, ag, ab] = lighting.ambient;
        Self {
            view_proj,
            camera_position: [camera_position[0], camera_position[1], camera_position[2], 1.0],
            sun_position: [px, py, pz, lighting.sun_range],
            sun_color: [r, g, b, lighting.sun_intensity],
            ambient: [ar, ag, ab, 0.0],
        }
    }
}

/// Per-draw model and material, bound with a dynamic offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: Mat4,
    pub color: [f32; 4],
    /// x = lit, y = textured.
    pub flags: [f32; 4],
}

impl DrawUniforms {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let lit = matches!(material.shading, Shading::Lit);
        Self {
            model,
            color: material.color,
            flags: [
                if lit { 1.0 } else { 0.0 },
                if material.texture.is_some() { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniforms {
    pub color: [f32; 4],
    /// x = intensity, y = textured.
    pub params: [f32; 4],
}

impl BackgroundUniforms {
    pub fn new(background: &BackgroundParams, textured: bool) -> Self {
        Self {
            color: background.color,
            params: [background.intensity, if textured { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BloomUniforms {
    /// 1.0 / texture_width, 1.0 / texture_height.
    pub texel_size: [f32; 2],
    pub threshold: f32,
    /// Number of taps on each side of the center.
    pub half_width: f32,
    pub weights: [[f32; 4]; BLUR_WEIGHT_VEC4S],
}

impl BloomUniforms {
    pub fn new(bloom: &BloomParams, width: u32, height: u32) -> Self {
        let mut packed = [[0.0; 4]; BLUR_WEIGHT_VEC4S];
        let weights = bloom.blur_weights();
        for (i, w) in weights.iter().enumerate().take(BLUR_WEIGHT_VEC4S * 4) {
            packed[i / 4][i % 4] = *w;
        }
        Self {
            texel_size: [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32],
            threshold: bloom.threshold,
            half_width: (weights.len().min(BLUR_WEIGHT_VEC4S * 4) - 1) as f32,
            weights: packed,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeUniforms {
    pub strength: f32,
    pub _padding: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::IDENTITY;
    use crate::params::MAX_BLUR_HALF_WIDTH;
    use orrery_common::Color;

    #[test]
    fn uniform_sizes_match_shader_structs() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 128);
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 96);
        assert_eq!(std::mem::size_of::<BackgroundUniforms>(), 32);
        assert_eq!(std::mem::size_of::<BloomUniforms>(), 160);
        assert_eq!(std::mem::size_of::<CompositeUniforms>(), 16);
    }

    #[test]
    fn weight_array_holds_max_kernel() {
        assert!(BLUR_WEIGHT_VEC4S * 4 >= MAX_BLUR_HALF_WIDTH);
    }

    #[test]
    fn bloom_uniforms_pack_weights_in_order() {
        let bloom = BloomParams::default();
        let u = BloomUniforms::new(&bloom, 200, 100);
        let weights = bloom.blur_weights();
        assert_eq!(u.half_width as usize, weights.len() - 1);
        assert_eq!(u.weights[0][0], weights[0]);
        assert_eq!(u.weights[1][1], weights[5]);
        assert!((u.texel_size[1] - 0.01).abs() < 1e-7);
    }

    #[test]
    fn draw_flags_follow_material() {
        let m = crate::scene::Material::lit(Color::from_rgba(10, 20, 30, 255))
            .with_texture(Some(crate::textures::TextureId(0)));
        let u = DrawUniforms::new(IDENTITY, &m);
        assert_eq!(u.flags[0], 1.0);
        assert_eq!(u.flags[1], 1.0);

        let u = DrawUniforms::new(IDENTITY, &Material::BLACK);
        assert_eq!(u.flags, [0.0; 4]);
        assert_eq!(u.color, [0.0, 0.0, 0.0, 1.0]);
    }
}
