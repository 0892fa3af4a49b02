//! Surface materials.

use orrery_common::Color;

use crate::textures::TextureId;

/// How a material responds to scene lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Color (or texture) is output as-is. Used for the sun and orbit markers.
    #[default]
    Unlit,
    /// Diffuse lighting from the sun's point light plus ambient.
    Lit,
}

/// Appearance of a renderable.
///
/// When `texture` is set the GPU backend samples it as the base color;
/// `color` is the flat fallback and what the software backend draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: Shading,
    /// Linear RGBA.
    pub color: [f32; 4],
    pub texture: Option<TextureId>,
    /// Loaded for completeness; shading uses geometric normals.
    pub bump: Option<TextureId>,
}

impl Material {
    /// Zero-luminance material drawn in place of non-bloom renderables
    /// during the bright pass. Still writes depth, so it occludes.
    pub const BLACK: Self = Self {
        shading: Shading::Unlit,
        color: [0.0, 0.0, 0.0, 1.0],
        texture: None,
        bump: None,
    };

    pub fn unlit(color: Color) -> Self {
        Self {
            shading: Shading::Unlit,
            color: color.to_linear(),
            texture: None,
            bump: None,
        }
    }

    pub fn lit(color: Color) -> Self {
        Self {
            shading: Shading::Lit,
            ..Self::unlit(color)
        }
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_bump(mut self, bump: Option<TextureId>) -> Self {
        self.bump = bump;
        self
    }

    /// Rec. 709 luminance of the flat color.
    pub fn luminance(&self) -> f32 {
        luminance(self.color)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::unlit(Color::from_rgba(255, 255, 255, 255))
    }
}

/// Rec. 709 luminance of a linear RGB(A) color.
pub fn luminance(c: [f32; 4]) -> f32 {
    0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2]
}

/// What a renderable currently draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialSlot {
    Visible(Material),
    /// The original material is parked in the substitution table and
    /// [`Material::BLACK`] is drawn instead.
    Suppressed,
}

impl MaterialSlot {
    /// Material to draw with right now.
    pub fn draw_material(&self) -> &Material {
        match self {
            MaterialSlot::Visible(m) => m,
            MaterialSlot::Suppressed => &Material::BLACK,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, MaterialSlot::Suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_has_zero_luminance() {
        assert_eq!(Material::BLACK.luminance(), 0.0);
        assert_eq!(Material::BLACK.shading, Shading::Unlit);
    }

    #[test]
    fn suppressed_slot_draws_black() {
        let slot = MaterialSlot::Suppressed;
        assert_eq!(*slot.draw_material(), Material::BLACK);
        assert!(slot.is_suppressed());
    }

    #[test]
    fn visible_slot_draws_its_material() {
        let m = Material::lit(Color::from_rgba(255, 0, 0, 255));
        let slot = MaterialSlot::Visible(m);
        assert_eq!(*slot.draw_material(), m);
        assert!(!slot.is_suppressed());
    }

    #[test]
    fn lit_keeps_color() {
        let m = Material::lit(Color::from_rgba(255, 255, 255, 255));
        assert_eq!(m.shading, Shading::Lit);
        assert!((m.luminance() - 1.0).abs() < 1e-5);
    }
}
