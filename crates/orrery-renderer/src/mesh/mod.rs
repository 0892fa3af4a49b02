//! Mesh generation: UV spheres for bodies and flat rings for orbit
//! markers and planetary rings.
//!
//! Meshes are plain triangle lists (no index buffer) built once at scene
//! construction and shared between renderables by [`MeshId`].

mod ring;
mod sphere;
mod types;

pub use ring::*;
pub use sphere::*;
pub use types::*;
