//! Drawable objects.

use orrery_common::{LayerMask, RenderableId};

use super::material::{Material, MaterialSlot};
use crate::matrix::{self, Mat4};
use crate::mesh::MeshId;

/// Placement of a renderable in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: [f32; 3],
    /// Fixed tilt about X, applied before spin.
    pub tilt_x: f32,
    /// Self-rotation about Y.
    pub spin_y: f32,
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            tilt_x: 0.0,
            spin_y: 0.0,
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn uniform_scale(s: f32) -> Self {
        Self {
            scale: [s; 3],
            ..Self::default()
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let [x, y, z] = self.position;
        let rotation = matrix::mul(&matrix::rotate_x(self.tilt_x), &matrix::rotate_y(self.spin_y));
        matrix::mul(
            &matrix::translate(x, y, z),
            &matrix::mul(&rotation, &matrix::scale(self.scale)),
        )
    }
}

/// Everything needed to add a renderable to a scene.
#[derive(Debug, Clone)]
pub struct RenderableDesc {
    pub name: String,
    pub mesh: MeshId,
    pub material: Material,
    pub transform: Transform,
    /// `None` means no layers, which is non-bloom.
    pub layers: Option<LayerMask>,
}

/// A mesh instance in the scene.
#[derive(Debug, Clone)]
pub struct Renderable {
    pub(crate) id: RenderableId,
    pub(crate) name: String,
    pub(crate) mesh: MeshId,
    pub(crate) slot: MaterialSlot,
    pub(crate) layers: LayerMask,
    pub transform: Transform,
    pub visible: bool,
}

impl Renderable {
    pub fn id(&self) -> RenderableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    /// Layer mask assigned at construction.
    pub fn layers(&self) -> LayerMask {
        self.layers
    }

    pub fn slot(&self) -> &MaterialSlot {
        &self.slot
    }

    /// The material this renderable draws with in the current pass.
    pub fn draw_material(&self) -> &Material {
        self.slot.draw_material()
    }

    /// The renderable's own material, or `None` while suppressed.
    pub fn material(&self) -> Option<&Material> {
        match &self.slot {
            MaterialSlot::Visible(m) => Some(m),
            MaterialSlot::Suppressed => None,
        }
    }

    /// Replace the material. Ignored while suppressed so a restore
    /// cannot clobber the edit.
    pub fn set_material(&mut self, material: Material) -> bool {
        match &mut self.slot {
            MaterialSlot::Visible(m) => {
                *m = material;
                true
            }
            MaterialSlot::Suppressed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transform_point;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let m = Transform::default().model_matrix();
        for (a, b) in m.iter().zip(matrix::IDENTITY.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn model_matrix_scales_then_translates() {
        let t = Transform {
            position: [10.0, 0.0, 0.0],
            ..Transform::uniform_scale(2.0)
        };
        let p = transform_point(&t.model_matrix(), [1.0, 0.0, 0.0]);
        assert!((p[0] - 12.0).abs() < 1e-5);
    }

    #[test]
    fn orbit_tilt_lays_ring_flat() {
        let t = Transform {
            tilt_x: std::f32::consts::FRAC_PI_2,
            ..Transform::default()
        };
        // A point on the XY ring at +Y ends up on the Z axis
        let p = transform_point(&t.model_matrix(), [0.0, 10.0, 0.0]);
        assert!(p[1].abs() < 1e-4);
        assert!((p[2] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn set_material_refused_while_suppressed() {
        let mut r = Renderable {
            id: RenderableId(0),
            name: "mars".into(),
            mesh: MeshId(0),
            slot: MaterialSlot::Suppressed,
            layers: LayerMask::NONE,
            transform: Transform::default(),
            visible: true,
        };
        assert!(!r.set_material(Material::default()));
        assert!(r.material().is_none());
    }
}
