//! Builds the renderable scene and body registry from config.

use std::f32::consts::FRAC_PI_2;

use orrery_common::{Color, LayerMask};
use orrery_config::schema::{BodyConfig, OrreryConfig};
use orrery_renderer::mesh::{generate_ring_mesh, generate_sphere_mesh_lod, MeshId, SphereLod};
use orrery_renderer::scene::{RenderableDesc, Transform};
use orrery_renderer::{Material, Scene, TextureCache};
use orrery_sim::{BodyRegistry, BodySpec};
use tracing::{debug, info, warn};

/// Everything the frame driver needs that comes from the config.
pub struct SolarSystem {
    pub scene: Scene,
    pub registry: BodyRegistry,
}

pub fn build(config: &OrreryConfig) -> SolarSystem {
    let mut scene = Scene::with_textures(TextureCache::new(&config.assets.dir));
    let mut registry = BodyRegistry::new();

    let background = scene.textures_mut().load(&config.background.texture);
    scene.set_background(background);

    let sphere = scene.add_mesh(generate_sphere_mesh_lod(SphereLod::STANDARD));

    add_sun(config, &mut scene, &mut registry, sphere);
    for body in &config.bodies {
        add_planet(body, &mut scene, &mut registry, sphere);
    }

    if config.orbit.show_markers {
        let color = parse_color(&config.orbit.marker_color, "orbit marker");
        for body in &config.bodies {
            let d = body.distance as f32;
            let mesh = scene.add_mesh(generate_ring_mesh(
                d,
                d + config.orbit.marker_width,
                config.orbit.marker_segments,
            ));
            scene.add(RenderableDesc {
                name: format!("{}-orbit", body.name),
                mesh,
                material: Material::unlit(color),
                transform: Transform {
                    tilt_x: FRAC_PI_2,
                    ..Transform::default()
                },
                layers: None,
            });
        }
    }

    info!(
        bodies = registry.len(),
        renderables = scene.len(),
        textures = scene.textures().len(),
        "solar system built"
    );
    SolarSystem { scene, registry }
}

fn add_sun(config: &OrreryConfig, scene: &mut Scene, registry: &mut BodyRegistry, sphere: MeshId) {
    let sun = &config.sun;
    let texture = scene.textures_mut().load(&sun.texture);
    let mesh = scene.add(RenderableDesc {
        name: "sun".into(),
        mesh: sphere,
        material: Material::unlit(parse_color(&sun.color, "sun")).with_texture(texture),
        transform: Transform::uniform_scale(sun.radius),
        layers: sun.bloom.then_some(LayerMask::BLOOM),
    });

    registry.register(BodySpec {
        name: "sun".into(),
        distance: 0.0,
        rate_factor: 0.0,
        radius: sun.radius,
        spin_rate: sun.spin_rate,
        bloom_member: sun.bloom,
        mesh,
        ring: None,
    });
}

fn add_planet(body: &BodyConfig, scene: &mut Scene, registry: &mut BodyRegistry, sphere: MeshId) {
    let texture = scene.textures_mut().load(&body.texture);
    let bump = scene.textures_mut().load(&body.bump_texture);
    let start = [body.distance as f32, 0.0, 0.0];

    let mesh = scene.add(RenderableDesc {
        name: body.name.clone(),
        mesh: sphere,
        material: Material::lit(parse_color(&body.color, &body.name))
            .with_texture(texture)
            .with_bump(bump),
        transform: Transform {
            position: start,
            ..Transform::uniform_scale(body.radius)
        },
        layers: body.bloom.then_some(LayerMask::BLOOM),
    });

    let ring = body.ring.as_ref().map(|ring| {
        let ring_mesh = scene.add_mesh(generate_ring_mesh(
            body.radius * ring.inner_scale,
            body.radius * ring.outer_scale,
            ring.segments,
        ));
        let ring_texture = scene.textures_mut().load(&ring.texture);
        debug!(body = %body.name, tilt = ring.tilt, "ring attached");
        scene.add(RenderableDesc {
            name: format!("{}-ring", body.name),
            mesh: ring_mesh,
            material: Material::lit(parse_color(&ring.color, "ring")).with_texture(ring_texture),
            transform: Transform {
                position: start,
                tilt_x: ring.tilt,
                ..Transform::default()
            },
            layers: None,
        })
    });

    registry.register(BodySpec {
        name: body.name.clone(),
        distance: body.distance,
        rate_factor: body.rate_factor,
        radius: body.radius,
        spin_rate: body.spin_rate,
        bloom_member: body.bloom,
        mesh,
        ring,
    });
}

fn parse_color(hex: &str, what: &str) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        warn!(color = hex, what, "invalid color, using grey");
        Color::from_rgba(128, 128, 128, 255)
    })
}
