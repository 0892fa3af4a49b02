//! Flat annulus generation.

use super::types::{MeshData, MeshVertex};

/// Generate a flat ring in the XY plane with its normal along +Z.
///
/// `u` runs from the inner edge (0) to the outer edge (1); `v` runs once
/// around. Orbit markers rotate this into the XZ plane at draw time.
pub fn generate_ring_mesh(inner: f32, outer: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let (inner, outer) = if inner <= outer {
        (inner, outer)
    } else {
        (outer, inner)
    };

    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let vertex = |radius: f32, u: f32, step: u32| {
        let v = step as f32 / segments as f32;
        let angle = std::f32::consts::TAU * v;
        MeshVertex {
            position: [radius * angle.cos(), radius * angle.sin(), 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [u, v],
        }
    };

    for step in 0..segments {
        let i0 = vertex(inner, 0.0, step);
        let o0 = vertex(outer, 1.0, step);
        let i1 = vertex(inner, 0.0, step + 1);
        let o1 = vertex(outer, 1.0, step + 1);

        vertices.extend_from_slice(&[i0, o0, i1, o0, o1, i1]);
    }

    MeshData { vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_vertex_count() {
        let mesh = generate_ring_mesh(10.0, 10.1, 124);
        assert_eq!(mesh.vertices.len(), 124 * 6);
    }

    #[test]
    fn ring_radii_within_bounds() {
        let mesh = generate_ring_mesh(2.7, 3.75, 32);
        for v in &mesh.vertices {
            let r = (v.position[0].powi(2) + v.position[1].powi(2)).sqrt();
            assert!(r > 2.7 - 1e-4 && r < 3.75 + 1e-4, "radius {r}");
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn ring_swaps_inverted_radii() {
        let mesh = generate_ring_mesh(5.0, 4.0, 8);
        let first = mesh.vertices[0].position;
        assert!((first[0] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ring_minimum_segments() {
        let mesh = generate_ring_mesh(1.0, 2.0, 0);
        assert_eq!(mesh.vertices.len(), 18);
    }
}
