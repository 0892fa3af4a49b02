//! Texture loading for body, ring, and starfield maps.
//!
//! Images are decoded once on the CPU with the `image` crate. Backends
//! upload them on first use. A texture that fails to load is not fatal:
//! the failure is logged and the material keeps its flat color.

mod cache;

pub use cache::*;
