//! The set of orbiting bodies and their handles into the scene.
//!
//! Bodies are created once at startup. Their orbital parameters never
//! change afterwards, so fields are private behind getters.

use orrery_common::{BodyId, RenderableId};
use tracing::debug;

/// Parameters for registering a body.
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub name: String,
    pub distance: f64,
    pub rate_factor: f64,
    pub radius: f32,
    pub spin_rate: f64,
    pub bloom_member: bool,
    /// The body's own mesh in the scene.
    pub mesh: RenderableId,
    /// A ring that travels with the body, if any.
    pub ring: Option<RenderableId>,
}

/// An orbiting body.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    name: String,
    distance: f64,
    rate_factor: f64,
    radius: f32,
    spin_rate: f64,
    bloom_member: bool,
    mesh: RenderableId,
    ring: Option<RenderableId>,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Orbit radius `d`.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Per-body multiplier `k` on the global orbital speed.
    pub fn rate_factor(&self) -> f64 {
        self.rate_factor
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn spin_rate(&self) -> f64 {
        self.spin_rate
    }

    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }

    pub fn is_bloom_member(&self) -> bool {
        self.bloom_member
    }

    pub fn mesh(&self) -> RenderableId {
        self.mesh
    }

    pub fn ring(&self) -> Option<RenderableId> {
        self.ring
    }
}

/// Ordered collection of bodies, indexed by [`BodyId`].
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body and return its id. Ids are dense and start at 0.
    pub fn register(&mut self, spec: BodySpec) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        debug!(
            %id,
            name = %spec.name,
            distance = spec.distance,
            rate_factor = spec.rate_factor,
            "registered body"
        );
        self.bodies.push(Body {
            id,
            name: spec.name,
            distance: spec.distance,
            rate_factor: spec.rate_factor,
            radius: spec.radius,
            spin_rate: spec.spin_rate,
            bloom_member: spec.bloom_member,
            mesh: spec.mesh,
            ring: spec.ring,
        });
        id
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    pub fn by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, distance: f64, ring: Option<RenderableId>) -> BodySpec {
        BodySpec {
            name: name.into(),
            distance,
            rate_factor: 0.1,
            radius: 1.0,
            spin_rate: 0.01,
            bloom_member: false,
            mesh: RenderableId(7),
            ring,
        }
    }

    #[test]
    fn ids_are_dense() {
        let mut registry = BodyRegistry::new();
        let a = registry.register(spec("a", 10.0, None));
        let b = registry.register(spec("b", 20.0, None));
        assert_eq!(a, BodyId(0));
        assert_eq!(b, BodyId(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_by_id_and_name() {
        let mut registry = BodyRegistry::new();
        let id = registry.register(spec("saturn", 38.0, Some(RenderableId(9))));
        let body = registry.get(id).unwrap();
        assert_eq!(body.name(), "saturn");
        assert!(body.has_ring());
        assert_eq!(body.ring(), Some(RenderableId(9)));
        assert_eq!(registry.by_name("saturn").unwrap().id(), id);
        assert!(registry.by_name("pluto").is_none());
    }

    #[test]
    fn unknown_id_is_none() {
        let registry = BodyRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(BodyId(3)).is_none());
    }
}
