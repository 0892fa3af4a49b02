//! UV sphere generation.

use super::types::{MeshData, MeshVertex, SphereLod};

/// Generate a unit UV sphere centered at the origin, north pole at +Y.
///
/// Each latitude/longitude quad becomes two triangles, producing
/// `n_lat * n_lon * 6` vertices. Scale by the body radius at draw time.
pub fn generate_sphere_mesh(n_lat: u32, n_lon: u32) -> MeshData {
    let n_lat = n_lat.max(2);
    let n_lon = n_lon.max(3);

    let mut vertices = Vec::with_capacity((n_lat * n_lon * 6) as usize);

    for lat in 0..n_lat {
        for lon in 0..n_lon {
            let v00 = sphere_vertex(lat, lon, n_lat, n_lon);
            let v10 = sphere_vertex(lat + 1, lon, n_lat, n_lon);
            let v01 = sphere_vertex(lat, lon + 1, n_lat, n_lon);
            let v11 = sphere_vertex(lat + 1, lon + 1, n_lat, n_lon);

            vertices.extend_from_slice(&[v00, v10, v01, v10, v11, v01]);
        }
    }

    MeshData { vertices }
}

pub fn generate_sphere_mesh_lod(lod: SphereLod) -> MeshData {
    generate_sphere_mesh(lod.latitudes, lod.longitudes)
}

fn sphere_vertex(lat: u32, lon: u32, n_lat: u32, n_lon: u32) -> MeshVertex {
    let u = lon as f32 / n_lon as f32;
    let v = lat as f32 / n_lat as f32;
    let theta = std::f32::consts::PI * v;
    let phi = std::f32::consts::TAU * u;

    let position = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
    MeshVertex {
        position,
        normal: position,
        uv: [u, v],
    }
}
