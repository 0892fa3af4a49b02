//! Bloom layer membership.

use super::renderable::Renderable;

/// Whether `renderable` contributes to the bloom chain.
///
/// Reads only the layer mask, so repeated calls always agree.
pub fn is_bloom_member(renderable: &Renderable) -> bool {
    renderable.layers().is_bloom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshId;
    use crate::scene::{Material, RenderableDesc, Scene, Transform};
    use orrery_common::LayerMask;

    fn desc(layers: Option<LayerMask>) -> RenderableDesc {
        RenderableDesc {
            name: "body".into(),
            mesh: MeshId(0),
            material: Material::default(),
            transform: Transform::default(),
            layers,
        }
    }

    #[test]
    fn bloom_mask_is_member() {
        let mut scene = Scene::new();
        let id = scene.add(desc(Some(LayerMask::BLOOM)));
        assert!(is_bloom_member(scene.get(id).unwrap()));
    }

    #[test]
    fn missing_mask_is_not_member() {
        let mut scene = Scene::new();
        let id = scene.add(desc(None));
        assert!(!is_bloom_member(scene.get(id).unwrap()));
    }

    #[test]
    fn other_layers_are_not_members() {
        let mut scene = Scene::new();
        let id = scene.add(desc(Some(LayerMask::layer(0))));
        assert!(!is_bloom_member(scene.get(id).unwrap()));
    }

    #[test]
    fn classification_is_idempotent() {
        let mut scene = Scene::new();
        let ids = [
            scene.add(desc(Some(LayerMask::BLOOM))),
            scene.add(desc(None)),
        ];
        for id in ids {
            let r = scene.get(id).unwrap();
            let first = is_bloom_member(r);
            for _ in 0..10 {
                assert_eq!(is_bloom_member(r), first);
            }
        }
    }
}
