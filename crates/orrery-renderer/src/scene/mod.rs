//! The drawable scene: meshes, renderables, and the textures they use.
//!
//! Renderables are addressed by [`RenderableId`]. Ids are never reused,
//! so a stale handle simply fails to resolve.

mod classify;
mod material;
mod renderable;
mod substitution;

pub use classify::is_bloom_member;
pub use material::{luminance, Material, MaterialSlot, Shading};
pub use renderable::{Renderable, RenderableDesc, Transform};
pub use substitution::{BrightPass, SubstitutionTable};

use orrery_common::RenderableId;
use orrery_sim::TransformSink;

use crate::mesh::{MeshData, MeshId};
use crate::textures::{TextureCache, TextureId};

#[derive(Debug, Default)]
pub struct Scene {
    renderables: Vec<Renderable>,
    meshes: Vec<MeshData>,
    textures: TextureCache,
    background: Option<TextureId>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_textures(textures: TextureCache) -> Self {
        Self {
            textures,
            ..Self::default()
        }
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0 as usize)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, m)| (MeshId(i as u32), m))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    /// Starfield drawn behind everything in the base pass.
    pub fn background(&self) -> Option<TextureId> {
        self.background
    }

    pub fn set_background(&mut self, texture: Option<TextureId>) {
        self.background = texture;
    }

    /// Add a renderable. Its layer mask is fixed from here on.
    pub fn add(&mut self, desc: RenderableDesc) -> RenderableId {
        let id = RenderableId(self.next_id);
        self.next_id += 1;
        self.renderables.push(Renderable {
            id,
            name: desc.name,
            mesh: desc.mesh,
            slot: MaterialSlot::Visible(desc.material),
            layers: desc.layers.unwrap_or_default(),
            transform: desc.transform,
            visible: true,
        });
        id
    }

    /// Remove a renderable. Outstanding handles to it stop resolving.
    pub fn remove(&mut self, id: RenderableId) -> Option<Renderable> {
        let index = self.index_of(id)?;
        Some(self.renderables.remove(index))
    }

    pub fn get(&self, id: RenderableId) -> Option<&Renderable> {
        self.index_of(id).map(|i| &self.renderables[i])
    }

    pub fn get_mut(&mut self, id: RenderableId) -> Option<&mut Renderable> {
        self.index_of(id).map(move |i| &mut self.renderables[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Renderable> {
        self.renderables.iter()
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    /// Number of renderables whose material is currently suppressed.
    pub fn suppressed_count(&self) -> usize {
        self.renderables
            .iter()
            .filter(|r| r.slot.is_suppressed())
            .count()
    }

    // Ids are assigned in increasing order and removal keeps order.
    fn index_of(&self, id: RenderableId) -> Option<usize> {
        self.renderables.binary_search_by_key(&id, |r| r.id).ok()
    }
}

impl TransformSink for Scene {
    fn set_position(&mut self, id: RenderableId, position: [f32; 3]) -> bool {
        match self.get_mut(id) {
            Some(r) => {
                r.transform.position = position;
                true
            }
            None => false,
        }
    }

    fn set_spin(&mut self, id: RenderableId, angle: f32) -> bool {
        match self.get_mut(id) {
            Some(r) => {
                r.transform.spin_y = angle;
                true
            }
            None => false,
        }
    }
}
