//! Selective bloom compositor.
//!
//! Each frame runs four passes against a [`PassBackend`]:
//!
//! 1. bright pass: non-bloom materials are parked and drawn black, the
//!    scene renders into the bright-source target and through the bloom chain
//! 2. restore: every parked material goes back
//! 3. base pass: the untouched scene with background
//! 4. combine: `base + strength * bloom`
//!
//! At both ends of the frame the substitution table must be empty and no
//! renderable may be left suppressed.

use orrery_config::schema::BloomMode;
use tracing::{debug, trace, warn};

use crate::backend::{PassBackend, SceneTarget};
use crate::gpu::{PhysicalSize, RendererError};
use crate::params::LiveParams;
use crate::scene::{BrightPass, Scene, SubstitutionTable};

/// Result of one [`SelectiveBloomCompositor::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Nothing was drawn: zero-sized target, failed allocation, or an
    /// unavailable surface.
    Skipped,
}

pub struct SelectiveBloomCompositor<B: PassBackend> {
    backend: B,
    table: SubstitutionTable,
    pending_size: Option<PhysicalSize>,
}

impl<B: PassBackend> SelectiveBloomCompositor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            table: SubstitutionTable::new(),
            pending_size: None,
        }
    }

    /// Create and request an initial target size.
    pub fn with_size(backend: B, width: u32, height: u32) -> Self {
        let mut compositor = Self::new(backend);
        compositor.resize(width, height);
        compositor
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn substitution_table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Record a new output size. Targets are reallocated at the start of the
    /// next frame, before the bright pass.
    pub fn resize(&mut self, width: u32, height: u32) {
        trace!(width, height, "resize requested");
        self.pending_size = Some(PhysicalSize::new(width, height));
    }

    /// Size of the currently allocated targets.
    pub fn size(&self) -> Option<PhysicalSize> {
        self.backend.size()
    }

    /// Render one frame.
    ///
    /// Returns [`RendererError::SubstitutionLeak`] if a parked material is
    /// found outside the bright pass; callers treat that as fatal.
    pub fn render(&mut self, scene: &mut Scene, params: &LiveParams) -> Result<FrameOutcome, RendererError> {
        self.check_restored(scene)?;

        if let Some(size) = self.pending_size {
            if size.is_empty() {
                trace!("zero-sized target, skipping frame");
                return Ok(FrameOutcome::Skipped);
            }
            self.pending_size = None;
            if let Err(e) = self.backend.allocate(size.width, size.height) {
                warn!("render target allocation failed: {e}");
                return Ok(FrameOutcome::Skipped);
            }
            debug!(width = size.width, height = size.height, "render targets resized");
        }

        if self.backend.size().is_none() {
            return Ok(FrameOutcome::Skipped);
        }
        if !self.backend.begin_frame(scene, params)? {
            return Ok(FrameOutcome::Skipped);
        }

        let bloom = &params.bloom;
        match bloom.mode {
            BloomMode::Selective => {
                let pass = BrightPass::begin(scene, &mut self.table);
                let drawn = self
                    .backend
                    .draw_scene(SceneTarget::BrightSource, pass.scene(), params);
                let restored = pass.restore();
                trace!(restored, "bright pass materials restored");
                drawn?;
                self.backend.bloom(Some(bloom))?;
            }
            BloomMode::Global => {
                self.backend
                    .draw_scene(SceneTarget::BrightSource, scene, params)?;
                self.backend.bloom(Some(bloom))?;
            }
            BloomMode::Off => self.backend.bloom(None)?,
        }

        self.backend.draw_scene(SceneTarget::Base, scene, params)?;
        self.backend.combine(bloom.effective_strength())?;
        self.backend.end_frame()?;

        self.check_restored(scene)?;
        Ok(FrameOutcome::Presented)
    }

    fn check_restored(&self, scene: &Scene) -> Result<(), RendererError> {
        if let Some(first) = self.table.first() {
            return Err(RendererError::SubstitutionLeak {
                count: self.table.len(),
                first,
            });
        }

        let mut suppressed = scene.iter().filter(|r| r.slot().is_suppressed());
        match suppressed.next() {
            None => Ok(()),
            Some(first) => Err(RendererError::SubstitutionLeak {
                count: 1 + suppressed.count(),
                first: first.id(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Frame, SoftwareBackend};
    use crate::mesh::{generate_ring_mesh, generate_sphere_mesh, MeshId};
    use crate::params::BloomParams;
    use crate::scene::{Material, MaterialSlot, RenderableDesc, Transform};
    use orrery_common::{Color, LayerMask, RenderableId};

    const SIZE: u32 = 100;

    struct TestScene {
        scene: Scene,
        sun: RenderableId,
        planet: RenderableId,
    }

    /// Sun of radius 5 at the origin, a planet of radius 2 at x = 10, and
    /// an orbit marker ring of radius 10 in the XZ plane.
    fn solar_scene() -> TestScene {
        let mut scene = Scene::new();
        let sphere = scene.add_mesh(generate_sphere_mesh(24, 24));
        let ring = scene.add_mesh(generate_ring_mesh(10.0, 10.1, 64));

        let sun = scene.add(RenderableDesc {
            name: "sun".into(),
            mesh: sphere,
            material: Material::unlit(Color::from_rgba(255, 204, 51, 255)),
            transform: Transform::uniform_scale(5.0),
            layers: Some(LayerMask::BLOOM),
        });
        let planet = scene.add(RenderableDesc {
            name: "planet".into(),
            mesh: sphere,
            material: Material::lit(Color::from_rgba(60, 120, 255, 255)),
            transform: Transform {
                position: [10.0, 0.0, 0.0],
                ..Transform::uniform_scale(2.0)
            },
            layers: None,
        });
        scene.add(RenderableDesc {
            name: "orbit".into(),
            mesh: ring,
            material: Material::unlit(Color::from_rgba(211, 211, 211, 255)),
            transform: Transform {
                tilt_x: std::f32::consts::FRAC_PI_2,
                ..Transform::default()
            },
            layers: None,
        });

        TestScene { scene, sun, planet }
    }

    fn params(mode: BloomMode, strength: f32) -> LiveParams {
        let mut params = LiveParams::default();
        params.bloom = BloomParams {
            mode,
            strength,
            ..BloomParams::default()
        };
        params.background.color = [0.1, 0.1, 0.1, 1.0];
        params.background.intensity = 1.0;
        params
    }

    fn compositor() -> SelectiveBloomCompositor<SoftwareBackend> {
        SelectiveBloomCompositor::with_size(SoftwareBackend::new(), SIZE, SIZE)
    }

    fn materials(scene: &Scene) -> Vec<(RenderableId, MaterialSlot)> {
        scene.iter().map(|r| (r.id(), *r.slot())).collect()
    }

    fn lit_pixels(frame: &Frame) -> Vec<(u32, u32)> {
        frame
            .enumerate()
            .filter(|(_, _, p)| p[0] != 0.0 || p[1] != 0.0 || p[2] != 0.0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn no_size_means_skipped() {
        let mut c = SelectiveBloomCompositor::new(SoftwareBackend::new());
        let mut t = solar_scene();
        let outcome = c.render(&mut t.scene, &LiveParams::default()).unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
    }

    #[test]
    fn bright_source_only_shows_the_sun() {
        let mut c = compositor();
        let mut t = solar_scene();
        let outcome = c.render(&mut t.scene, &params(BloomMode::Selective, 2.0)).unwrap();
        assert_eq!(outcome, FrameOutcome::Presented);

        let bright = c.backend().bright_source();
        let lit = lit_pixels(bright);
        assert!(!lit.is_empty());
        assert!(!bright.is_black(SIZE / 2, SIZE / 2));

        // Sun silhouette radius is about 6.5 px at this camera distance.
        let center = SIZE as f32 / 2.0;
        for (x, y) in lit {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            assert!((dx * dx + dy * dy).sqrt() <= 7.5, "lit pixel outside sun at ({x}, {y})");
        }
    }

    #[test]
    fn planet_is_black_in_bright_source_but_drawn_in_base() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.render(&mut t.scene, &params(BloomMode::Selective, 2.0)).unwrap();

        // x = 10 projects to about 50 + 13 px
        let (px, py) = (63, SIZE / 2);
        assert!(c.backend().bright_source().is_black(px, py));
        let base = c.backend().base().get(px, py);
        assert!(base[2] > 0.5, "planet missing from base pass: {base:?}");
    }

    #[test]
    fn background_only_in_base_pass() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.render(&mut t.scene, &params(BloomMode::Selective, 2.0)).unwrap();
        assert!(c.backend().bright_source().is_black(0, 0));
        assert!((c.backend().base().get(0, 0)[0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn zero_strength_output_equals_base() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.render(&mut t.scene, &params(BloomMode::Selective, 0.0)).unwrap();
        assert_eq!(c.backend().output(), c.backend().base());

        let mut off = compositor();
        let mut t2 = solar_scene();
        off.render(&mut t2.scene, &params(BloomMode::Off, 2.0)).unwrap();
        assert_eq!(off.backend().output(), c.backend().output());
    }

    #[test]
    fn bloom_brightens_around_the_sun() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.render(&mut t.scene, &params(BloomMode::Selective, 2.0)).unwrap();

        // Just above the silhouette: background in base, glow in output.
        let (x, y) = (SIZE / 2, SIZE / 2 - 9);
        let base = c.backend().base().get(x, y);
        let out = c.backend().output().get(x, y);
        assert!(out[0] > base[0]);
    }

    #[test]
    fn global_mode_blooms_every_renderable() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.render(&mut t.scene, &params(BloomMode::Global, 2.0)).unwrap();
        assert!(!c.backend().bright_source().is_black(63, SIZE / 2));
        assert!(c.substitution_table().is_empty());
    }

    #[test]
    fn off_mode_leaves_bloom_target_black() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.render(&mut t.scene, &params(BloomMode::Off, 2.0)).unwrap();
        assert!(lit_pixels(c.backend().bloom_target()).is_empty());
    }

    #[test]
    fn materials_restored_and_table_empty_after_every_frame() {
        let mut c = compositor();
        let mut t = solar_scene();
        let before = materials(&t.scene);
        for _ in 0..3 {
            c.render(&mut t.scene, &params(BloomMode::Selective, 2.0)).unwrap();
            assert!(c.substitution_table().is_empty());
            assert_eq!(t.scene.suppressed_count(), 0);
            assert_eq!(materials(&t.scene), before);
        }
        assert_eq!(c.backend().frames_presented(), 3);
        assert!(t.scene.get(t.sun).is_some());
        assert!(t.scene.get(t.planet).unwrap().material().is_some());
    }

    #[test]
    fn resize_changes_output_resolution() {
        let mut c = compositor();
        let mut t = solar_scene();
        let p = params(BloomMode::Selective, 2.0);
        c.render(&mut t.scene, &p).unwrap();
        assert_eq!(c.backend().output().width(), SIZE);

        c.resize(64, 48);
        assert_eq!(c.render(&mut t.scene, &p).unwrap(), FrameOutcome::Presented);
        let out = c.backend().output();
        assert_eq!((out.width(), out.height()), (64, 48));
        assert_eq!(c.size(), Some(PhysicalSize::new(64, 48)));
    }

    #[test]
    fn zero_size_skips_until_valid() {
        let mut c = compositor();
        let mut t = solar_scene();
        let p = params(BloomMode::Selective, 2.0);

        c.resize(0, 48);
        assert_eq!(c.render(&mut t.scene, &p).unwrap(), FrameOutcome::Skipped);
        assert_eq!(c.render(&mut t.scene, &p).unwrap(), FrameOutcome::Skipped);
        assert_eq!(c.backend().frames_presented(), 0);

        c.resize(32, 32);
        assert_eq!(c.render(&mut t.scene, &p).unwrap(), FrameOutcome::Presented);
        assert_eq!(c.backend().output().width(), 32);
    }

    #[test]
    fn oversized_target_skips_frame() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.resize(u32::MAX, 10);
        let outcome = c.render(&mut t.scene, &params(BloomMode::Selective, 2.0)).unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
    }

    #[test]
    fn leaked_entry_is_reported() {
        let mut c = compositor();
        let mut t = solar_scene();
        c.table.park(t.planet, Material::default());

        let err = c
            .render(&mut t.scene, &params(BloomMode::Selective, 2.0))
            .unwrap_err();
        match err {
            RendererError::SubstitutionLeak { count, first } => {
                assert_eq!(count, 1);
                assert_eq!(first, t.planet);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn renderable_left_suppressed_is_reported() {
        let mut c = compositor();
        let mut t = solar_scene();
        t.scene.get_mut(t.planet).unwrap().slot = MaterialSlot::Suppressed;

        let err = c
            .render(&mut t.scene, &params(BloomMode::Selective, 2.0))
            .unwrap_err();
        match err {
            RendererError::SubstitutionLeak { count, first } => {
                assert_eq!(count, 1);
                assert_eq!(first, t.planet);
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(c.substitution_table().is_empty());
    }

    fn sun_scene() -> (Scene, MeshId) {
        let mut scene = Scene::new();
        let sphere = scene.add_mesh(generate_sphere_mesh(24, 24));
        scene.add(RenderableDesc {
            name: "sun".into(),
            mesh: sphere,
            material: Material::unlit(Color::from_rgba(255, 204, 51, 255)),
            transform: Transform::uniform_scale(5.0),
            layers: Some(LayerMask::BLOOM),
        });
        (scene, sphere)
    }

    #[test]
    fn suppressed_body_in_front_of_the_sun_blocks_its_glow() {
        let p = params(BloomMode::Selective, 2.0);
        let center = (SIZE / 2, SIZE / 2);

        let (mut sun_only, _) = sun_scene();
        let mut reference = compositor();
        reference.render(&mut sun_only, &p).unwrap();
        let silhouette = lit_pixels(reference.backend().bright_source());
        assert!(silhouette.contains(&center));

        // A moon between the camera and the sun, and a planet beside it.
        let (mut scene, sphere) = sun_scene();
        for (position, radius) in [([0.0, 0.0, 30.0], 1.0), ([12.0, 0.0, 0.0], 2.0)] {
            scene.add(RenderableDesc {
                name: "body".into(),
                mesh: sphere,
                material: Material::lit(Color::from_rgba(255, 255, 255, 255)),
                transform: Transform {
                    position,
                    ..Transform::uniform_scale(radius)
                },
                layers: None,
            });
        }

        let mut c = compositor();
        c.render(&mut scene, &p).unwrap();
        let bright = c.backend().bright_source();
        assert!(bright.is_black(center.0, center.1));

        let lit = lit_pixels(bright);
        assert!(!lit.is_empty());
        assert!(lit.len() < silhouette.len());
        for px in &lit {
            assert!(silhouette.contains(px), "glow outside the sun at {px:?}");
        }

        // The moon itself is drawn normally in the base pass.
        assert!(c.backend().base().get(center.0, center.1)[0] > 0.9);
    }

    /// Backend that fails the bright-source draw.
    #[derive(Default)]
    struct FailingBackend {
        size: Option<PhysicalSize>,
        suppressed_during_draw: usize,
    }

    impl PassBackend for FailingBackend {
        fn allocate(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
            self.size = Some(PhysicalSize::new(width, height));
            Ok(())
        }

        fn size(&self) -> Option<PhysicalSize> {
            self.size
        }

        fn begin_frame(&mut self, _: &Scene, _: &LiveParams) -> Result<bool, RendererError> {
            Ok(true)
        }

        fn draw_scene(&mut self, target: SceneTarget, scene: &Scene, _: &LiveParams) -> Result<(), RendererError> {
            self.suppressed_during_draw = scene.suppressed_count();
            match target {
                SceneTarget::BrightSource => Err(RendererError::DeviceError("lost".into())),
                SceneTarget::Base => Ok(()),
            }
        }

        fn bloom(&mut self, _: Option<&BloomParams>) -> Result<(), RendererError> {
            Ok(())
        }

        fn combine(&mut self, _: f32) -> Result<(), RendererError> {
            Ok(())
        }

        fn end_frame(&mut self) -> Result<(), RendererError> {
            Ok(())
        }
    }

    #[test]
    fn failed_bright_pass_still_restores_materials() {
        let mut c = SelectiveBloomCompositor::with_size(FailingBackend::default(), 8, 8);
        let mut t = solar_scene();
        let before = materials(&t.scene);

        let err = c.render(&mut t.scene, &params(BloomMode::Selective, 2.0));
        assert!(matches!(err, Err(RendererError::DeviceError(_))));
        // Planet and orbit marker were suppressed while drawing.
        assert_eq!(c.backend().suppressed_during_draw, 2);
        assert!(c.substitution_table().is_empty());
        assert_eq!(materials(&t.scene), before);
    }
}
