//! Render layer membership.
//!
//! Every renderable carries a [`LayerMask`] assigned once at construction.
//! The compositor only cares about one bit: whether the object emits bloom.

use serde::{Deserialize, Serialize};

/// Layer index reserved for bloom-emitting renderables.
pub const BLOOM_LAYER: u32 = 1;

/// Bitset of render layers a renderable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Member of no layer. Renderables without an explicit mask get this.
    pub const NONE: Self = Self(0);

    /// Mask with only the bloom layer enabled.
    pub const BLOOM: Self = Self(1 << BLOOM_LAYER);

    /// Mask with a single layer enabled.
    pub fn layer(index: u32) -> Self {
        Self(1u32.checked_shl(index).unwrap_or(0))
    }

    /// Enable `index` in addition to whatever is already set.
    pub fn enable(&mut self, index: u32) {
        self.0 |= Self::layer(index).0;
    }

    /// Clear `index`.
    pub fn disable(&mut self, index: u32) {
        self.0 &= !Self::layer(index).0;
    }

    pub fn contains(self, index: u32) -> bool {
        self.0 & Self::layer(index).0 != 0
    }

    /// True when the two masks share at least one layer.
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_bloom(self) -> bool {
        self.contains(BLOOM_LAYER)
    }
}
