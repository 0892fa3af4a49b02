//! Frame driver: clock → kinematics → compositor, once per host redraw.

use orrery_sim::{BodyRegistry, KinematicsUpdater, TimeSource};
use tracing::{debug, error, trace};

use crate::backend::PassBackend;
use crate::compositor::{FrameOutcome, SelectiveBloomCompositor};
use crate::gpu::RendererError;
use crate::params::LiveParams;
use crate::perf::FrameTimer;
use crate::scene::Scene;

/// Frames between periodic timing lines.
const STATS_INTERVAL: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No frame presented yet.
    Idle,
    Running { frames: u64 },
}

pub struct FrameDriver<B: PassBackend> {
    clock: Box<dyn TimeSource>,
    registry: BodyRegistry,
    updater: KinematicsUpdater,
    scene: Scene,
    compositor: SelectiveBloomCompositor<B>,
    params: LiveParams,
    state: DriverState,
    timer: FrameTimer,
    last_t_ms: f64,
}

impl<B: PassBackend> FrameDriver<B> {
    pub fn new(
        clock: Box<dyn TimeSource>,
        registry: BodyRegistry,
        updater: KinematicsUpdater,
        scene: Scene,
        compositor: SelectiveBloomCompositor<B>,
        params: LiveParams,
    ) -> Self {
        Self {
            clock,
            registry,
            updater,
            scene,
            compositor,
            params,
            state: DriverState::Idle,
            timer: FrameTimer::new(),
            last_t_ms: 0.0,
        }
    }

    /// Produce one frame.
    ///
    /// A [`RendererError::SubstitutionLeak`] is logged at error level and
    /// returned; the host must not keep rendering after it.
    pub fn tick(&mut self) -> Result<FrameOutcome, RendererError> {
        let t_ms = self.clock.elapsed_ms();
        self.last_t_ms = t_ms;
        let placed = self.updater.update(&self.registry, t_ms, &mut self.scene);
        trace!(t_ms, placed, "bodies placed");

        self.timer.begin_frame();
        let outcome = match self.compositor.render(&mut self.scene, &self.params) {
            Ok(outcome) => outcome,
            Err(e @ RendererError::SubstitutionLeak { .. }) => {
                error!("{e}");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        match outcome {
            FrameOutcome::Presented => {
                let frames = match self.state {
                    DriverState::Idle => 1,
                    DriverState::Running { frames } => frames + 1,
                };
                self.state = DriverState::Running { frames };
                self.updater.frame_presented();
                if frames % STATS_INTERVAL == 0 {
                    debug!(
                        frames,
                        fps = self.timer.fps(),
                        frame_ms = self.timer.frame_time_ms(),
                        skipped = self.timer.skipped(),
                        "frame stats"
                    );
                }
            }
            FrameOutcome::Skipped => self.timer.record_skip(),
        }
        Ok(outcome)
    }

    /// Forward a host resize. Applied at the start of the next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.compositor.resize(width, height);
    }

    /// Replace the live parameters read by the next frame.
    pub fn set_params(&mut self, params: LiveParams) {
        self.params = params;
    }

    pub fn params(&self) -> &LiveParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut LiveParams {
        &mut self.params
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Elapsed time used by the most recent tick.
    pub fn last_t_ms(&self) -> f64 {
        self.last_t_ms
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn updater_mut(&mut self) -> &mut KinematicsUpdater {
        &mut self.updater
    }

    pub fn compositor(&self) -> &SelectiveBloomCompositor<B> {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut SelectiveBloomCompositor<B> {
        &mut self.compositor
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}
