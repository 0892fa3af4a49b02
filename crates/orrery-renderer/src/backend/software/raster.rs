//! Depth-tested triangle rasterization with flat material colors.

use orrery_common::types::srgb_to_linear;

use crate::matrix::{self, transform_point, Mat4};
use crate::params::BackgroundParams;
use crate::scene::Scene;

use super::frame::Frame;

/// Clip-space `w` below which a vertex is treated as behind the camera.
const MIN_CLIP_W: f32 = 1e-5;

/// Fill `frame` with the background.
///
/// A starfield texture is stretched over the viewport (nearest sample);
/// without one the flat background color is used. Both are scaled by
/// `background.intensity`.
pub(super) fn draw_background(frame: &mut Frame, scene: &Scene, background: &BackgroundParams) {
    let intensity = background.intensity;
    let starfield = scene.background().and_then(|id| scene.textures().get(id));

    match starfield {
        Some(image) if image.width() > 0 && image.height() > 0 => {
            let (w, h) = (frame.width(), frame.height());
            let channel = |c: u8| srgb_to_linear(c as f32 / 255.0) * intensity;
            for y in 0..h {
                let ty = (y as u64 * image.height() as u64 / h as u64) as u32;
                for x in 0..w {
                    let tx = (x as u64 * image.width() as u64 / w as u64) as u32;
                    let texel = image.get_pixel(tx, ty).0;
                    frame.set(x, y, [channel(texel[0]), channel(texel[1]), channel(texel[2]), 1.0]);
                }
            }
        }
        _ => {
            let c = background.color;
            frame.fill([c[0] * intensity, c[1] * intensity, c[2] * intensity, 1.0]);
        }
    }
}

/// Rasterize every visible renderable into `color` with depth testing.
/// Returns the number of triangles that produced at least one fragment.
pub(super) fn draw_renderables(
    color: &mut Frame,
    depth: &mut [f32],
    scene: &Scene,
    view_proj: &Mat4,
) -> usize {
    let mut drawn = 0;
    for renderable in scene.iter().filter(|r| r.visible) {
        let Some(mesh) = scene.mesh(renderable.mesh()) else {
            continue;
        };
        let mvp = matrix::mul(view_proj, &renderable.transform.model_matrix());
        let rgba = renderable.draw_material().color;

        for tri in mesh.triangles() {
            let clip = [
                transform_point(&mvp, tri[0].position),
                transform_point(&mvp, tri[1].position),
                transform_point(&mvp, tri[2].position),
            ];
            if fill_triangle(color, depth, &clip, rgba) {
                drawn += 1;
            }
        }
    }
    drawn
}

/// Screen-space vertex: pixel x, pixel y, NDC depth.
type ScreenVertex = [f32; 3];

fn to_screen(clip: [f32; 4], width: f32, height: f32) -> ScreenVertex {
    let inv_w = 1.0 / clip[3];
    let ndc = [clip[0] * inv_w, clip[1] * inv_w, clip[2] * inv_w];
    [
        (ndc[0] * 0.5 + 0.5) * width,
        (0.5 - ndc[1] * 0.5) * height,
        ndc[2],
    ]
}

fn edge(a: ScreenVertex, b: ScreenVertex, px: f32, py: f32) -> f32 {
    (px - a[0]) * (b[1] - a[1]) - (py - a[1]) * (b[0] - a[0])
}

// Both windings are filled: rings are seen from either side.
fn fill_triangle(color: &mut Frame, depth: &mut [f32], clip: &[[f32; 4]; 3], rgba: [f32; 4]) -> bool {
    if clip.iter().any(|v| v[3] <= MIN_CLIP_W) {
        return false;
    }

    let (width, height) = (color.width(), color.height());
    let (wf, hf) = (width as f32, height as f32);
    let v = [
        to_screen(clip[0], wf, hf),
        to_screen(clip[1], wf, hf),
        to_screen(clip[2], wf, hf),
    ];

    let area = edge(v[0], v[1], v[2][0], v[2][1]);
    if area.abs() < 1e-12 {
        return false;
    }

    let min_x = v.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min).floor().max(0.0);
    let max_x = v.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max).ceil().min(wf - 1.0);
    let min_y = v.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min).floor().max(0.0);
    let max_y = v.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max).ceil().min(hf - 1.0);
    if min_x > max_x || min_y > max_y {
        return false;
    }

    let mut hit = false;
    for y in min_y as u32..=max_y as u32 {
        let py = y as f32 + 0.5;
        for x in min_x as u32..=max_x as u32 {
            let px = x as f32 + 0.5;
            let w0 = edge(v[1], v[2], px, py) / area;
            let w1 = edge(v[2], v[0], px, py) / area;
            let w2 = edge(v[0], v[1], px, py) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let z = w0 * v[0][2] + w1 * v[1][2] + w2 * v[2][2];
            if !(0.0..=1.0).contains(&z) {
                continue;
            }
            let index = (y * width + x) as usize;
            if z < depth[index] {
                depth[index] = z;
                color.set(x, y, rgba);
                hit = true;
            }
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::mesh::generate_sphere_mesh;
    use crate::scene::{Material, RenderableDesc, Transform};
    use orrery_common::Color;

    fn sphere_scene(positions: &[([f32; 3], Color)]) -> Scene {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(generate_sphere_mesh(16, 16));
        for (i, (position, color)) in positions.iter().enumerate() {
            scene.add(RenderableDesc {
                name: format!("s{i}"),
                mesh,
                material: Material::unlit(*color),
                transform: Transform {
                    position: *position,
                    ..Transform::uniform_scale(5.0)
                },
                layers: None,
            });
        }
        scene
    }

    fn render(scene: &Scene, size: u32) -> Frame {
        let mut frame = Frame::new(size, size);
        let mut depth = vec![1.0; (size * size) as usize];
        let vp = Camera::default().view_proj(1.0);
        draw_renderables(&mut frame, &mut depth, scene, &vp);
        frame
    }

    #[test]
    fn sphere_at_origin_covers_center_only() {
        let scene = sphere_scene(&[([0.0; 3], Color::from_rgba(255, 0, 0, 255))]);
        let frame = render(&scene, 64);
        assert!(!frame.is_black(32, 32));
        assert!(frame.is_black(0, 0));
        assert!(frame.is_black(63, 63));
    }

    #[test]
    fn nearer_sphere_wins_depth_test() {
        let red = Color::from_rgba(255, 0, 0, 255);
        let green = Color::from_rgba(0, 255, 0, 255);
        // Green is drawn second but sits behind red.
        let scene = sphere_scene(&[([0.0, 0.0, 10.0], red), ([0.0, 0.0, -10.0], green)]);
        let frame = render(&scene, 64);
        let center = frame.get(32, 32);
        assert!(center[0] > 0.9);
        assert_eq!(center[1], 0.0);
    }

    #[test]
    fn geometry_behind_camera_is_dropped() {
        let scene = sphere_scene(&[([0.0, 0.0, 80.0], Color::from_rgba(255, 255, 255, 255))]);
        let frame = render(&scene, 32);
        assert!(frame.enumerate().all(|(_, _, p)| p[0] == 0.0));
    }

    #[test]
    fn background_uses_color_times_intensity() {
        let scene = Scene::new();
        let mut frame = Frame::new(4, 4);
        let bg = BackgroundParams {
            color: [0.2, 0.4, 0.8, 1.0],
            intensity: 0.5,
        };
        draw_background(&mut frame, &scene, &bg);
        let p = frame.get(1, 2);
        assert!((p[0] - 0.1).abs() < 1e-6);
        assert!((p[2] - 0.4).abs() < 1e-6);
    }
}
