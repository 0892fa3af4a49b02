//! Orbital simulation for Orrery: the clock, the body registry, and the
//! kinematics update that turns elapsed time into per-body placements.
//!
//! Nothing here touches the GPU. The renderer's scene implements
//! [`TransformSink`] and receives the computed placements.

pub mod bodies;
pub mod clock;
pub mod kinematics;

pub use bodies::{Body, BodyRegistry, BodySpec};
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use kinematics::{
    orbital_position, spin_angle, KinematicsUpdater, TransformSink, NOMINAL_FRAME_MS,
};
