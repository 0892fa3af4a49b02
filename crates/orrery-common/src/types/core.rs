use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a celestial body in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body-{}", self.0)
    }
}

/// Stable identity of a renderable in the scene.
///
/// Bodies hold these as weak handles; they are resolved against the scene
/// when transforms are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderableId(pub u32);

impl fmt::Display for RenderableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "renderable-{}", self.0)
    }
}
