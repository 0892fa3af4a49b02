//! Rendering for Orrery: the scene model, the selective bloom compositor,
//! and the frame driver that ties the simulation to it.
//!
//! The compositor is generic over [`PassBackend`]. [`GpuBackend`] draws
//! through wgpu into a window surface; [`SoftwareBackend`] rasterizes on
//! the CPU for headless snapshots and tests.

pub mod backend;
pub mod camera;
pub mod compositor;
pub mod driver;
pub mod gpu;
pub mod matrix;
pub mod mesh;
pub mod params;
pub mod perf;
pub mod scene;
pub mod textures;

mod helpers;

pub use backend::{Frame, GpuBackend, PassBackend, SceneTarget, SoftwareBackend};
pub use compositor::{FrameOutcome, SelectiveBloomCompositor};
pub use driver::{DriverState, FrameDriver};
pub use gpu::{GpuContext, PhysicalSize, RendererError};
pub use params::LiveParams;
pub use perf::FrameTimer;
pub use scene::{is_bloom_member, Material, MaterialSlot, Renderable, Scene, Shading};
pub use textures::TextureCache;
