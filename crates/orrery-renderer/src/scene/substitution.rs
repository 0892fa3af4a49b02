//! Material substitution for the bright pass.
//!
//! [`BrightPass::begin`] parks every non-bloom renderable's material in a
//! [`SubstitutionTable`] and marks its slot suppressed. [`BrightPass::restore`]
//! (or dropping the guard) puts every material back and empties the table.

use std::collections::HashMap;

use orrery_common::RenderableId;
use tracing::{trace, warn};

use super::classify::is_bloom_member;
use super::material::{Material, MaterialSlot};
use super::Scene;

/// Original materials of renderables currently suppressed.
///
/// Empty at the start and end of every frame.
#[derive(Debug, Default)]
pub struct SubstitutionTable {
    entries: HashMap<RenderableId, Material>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: RenderableId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Lowest id still parked, for error reports.
    pub fn first(&self) -> Option<RenderableId> {
        self.entries.keys().min().copied()
    }

    pub(crate) fn park(&mut self, id: RenderableId, material: Material) {
        self.entries.insert(id, material);
    }

    fn drain(&mut self) -> Vec<(RenderableId, Material)> {
        self.entries.drain().collect()
    }
}

/// Guard over a scene whose non-bloom materials are suppressed.
pub struct BrightPass<'a> {
    scene: &'a mut Scene,
    table: &'a mut SubstitutionTable,
    restored: bool,
}

impl<'a> BrightPass<'a> {
    /// Suppress every renderable that is not a bloom member.
    pub fn begin(scene: &'a mut Scene, table: &'a mut SubstitutionTable) -> Self {
        for renderable in scene.renderables.iter_mut() {
            if is_bloom_member(renderable) {
                continue;
            }
            match std::mem::replace(&mut renderable.slot, MaterialSlot::Suppressed) {
                MaterialSlot::Visible(material) => table.park(renderable.id, material),
                MaterialSlot::Suppressed => {
                    warn!(id = %renderable.id, "renderable already suppressed at bright pass start");
                }
            }
        }
        trace!(suppressed = table.len(), "bright pass begun");

        Self {
            scene,
            table,
            restored: false,
        }
    }

    /// The scene as the bright pass sees it.
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Number of materials currently parked.
    pub fn suppressed(&self) -> usize {
        self.table.len()
    }

    /// Put every parked material back. Returns how many were restored.
    pub fn restore(mut self) -> usize {
        self.restore_all()
    }

    fn restore_all(&mut self) -> usize {
        if self.restored {
            return 0;
        }
        self.restored = true;

        let mut count = 0;
        for (id, material) in self.table.drain() {
            match self.scene.get_mut(id) {
                Some(renderable) => {
                    renderable.slot = MaterialSlot::Visible(material);
                    count += 1;
                }
                None => warn!(%id, "parked material has no renderable to return to"),
            }
        }
        trace!(restored = count, "bright pass restored");
        count
    }
}

impl Drop for BrightPass<'_> {
    fn drop(&mut self) {
        self.restore_all();
    }
}
