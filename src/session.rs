//! Per-window state that survives GPU and window churn.
//!
//! A `Session` owns the composed room, the frame scheduler, the camera rig and
//! the shell. It has no GPU handles, so the whole frame flow short of drawing
//! can run headless.

use crate::animation::PhaseSource;
use crate::camera::{Camera, CameraRig};
use crate::config::AppConfig;
use crate::error::RenderError;
use crate::frame::{FrameCallback, FrameInfo, FrameScheduler};
use crate::scene::{InstanceBatches, Palette, SceneGraph};
use crate::scenes::{compose_server_room, RoomScene, RoomStats};
use crate::shell::{Shell, ViewChanges};
use crate::types::CameraUniform;
use crate::ui::{OverlayOutput, ViewState};

pub struct Session {
    config: AppConfig,
    seed: u64,
    shell: Shell,
    room: RoomScene,
    scheduler: FrameScheduler,
    rig: CameraRig,
    batches: InstanceBatches,
    time: f32,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Session seed {seed}");

        let view = ViewState::new(config.section, config.theme);
        let mut scheduler = FrameScheduler::new();
        let room = Self::compose(&config, seed, &view, &mut scheduler);
        let rig = CameraRig::new(&room.geometry, view.section, config.animation.camera_ease);

        Self {
            config,
            seed,
            shell: Shell::new(view),
            room,
            scheduler,
            rig,
            batches: InstanceBatches::default(),
            time: 0.0,
        }
    }

    /// Fresh graph and animator; the animator replaces every registered callback
    fn compose(config: &AppConfig, seed: u64, view: &ViewState, scheduler: &mut FrameScheduler) -> RoomScene {
        let mut source = PhaseSource::seeded(seed);
        let (room, animator) = compose_server_room(
            &config.layout,
            &config.animation,
            Palette::for_theme(view.theme),
            &mut source,
        )
        .into_parts();
        scheduler.clear();
        scheduler.register(animator);
        room
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn view(&self) -> &ViewState {
        self.shell.view()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.room.graph
    }

    pub fn stats(&self) -> RoomStats {
        self.room.stats
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn batches(&self) -> &InstanceBatches {
        &self.batches
    }

    pub fn palette(&self) -> &'static Palette {
        Palette::for_theme(self.view().theme)
    }

    /// Extra per-frame work, run after the animator
    pub fn register(&mut self, callback: impl FrameCallback + 'static) {
        self.scheduler.register(callback);
    }

    pub fn callback_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Runs frame callbacks inside the boundary, eases the camera and
    /// rebuilds the instance batches. Returns `None` while failed.
    pub fn advance(&mut self) -> Option<FrameInfo> {
        let scheduler = &mut self.scheduler;
        let graph = &mut self.room.graph;
        let frame = self.shell.guard(|| Ok(scheduler.tick(graph)))?;
        self.finish_frame(frame);
        Some(frame)
    }

    /// Like `advance`, with an explicit frame instead of the wall clock
    pub fn advance_to(&mut self, frame: FrameInfo) -> Option<FrameInfo> {
        let scheduler = &mut self.scheduler;
        let graph = &mut self.room.graph;
        self.shell.guard(|| {
            scheduler.run_frame(&frame, graph);
            Ok(())
        })?;
        self.finish_frame(frame);
        Some(frame)
    }

    fn finish_frame(&mut self, frame: FrameInfo) {
        self.time = frame.time;
        self.rig.update(frame.delta);
        self.room.graph.collect_instances(&mut self.batches);
    }

    pub fn camera_uniform(&self, width: u32, height: u32) -> CameraUniform {
        let mut camera = Camera::new(self.rig.current(), 1.0);
        camera.set_viewport(width, height);
        let palette = self.palette();
        camera
            .to_uniform(self.time)
            .with_environment(palette.fog, palette.ambient)
    }

    /// Hands the camera, batches and clear colour to `draw` inside the boundary
    pub fn render_scene(
        &mut self,
        width: u32,
        height: u32,
        draw: impl FnOnce(&CameraUniform, &mut InstanceBatches, [f32; 3]) -> Result<(), RenderError>,
    ) -> bool {
        let camera = self.camera_uniform(width, height);
        let clear = self.palette().background;
        let batches = &mut self.batches;
        self.shell.guard(|| draw(&camera, batches, clear)).is_some()
    }

    pub fn report_failure(&mut self, err: &RenderError) {
        if !self.shell.is_failed() {
            self.shell.report_failure(err);
        }
    }

    /// Applies overlay clicks. Theme recolours in place; section retargets the camera.
    pub fn apply_overlay(&mut self, output: OverlayOutput) -> ViewChanges {
        let changes = self.shell.handle_all(output.events);
        if changes.theme {
            let palette = self.palette();
            let recolored = self.room.graph.recolor(palette);
            log::debug!("Theme {:?}: recoloured {recolored} meshes", self.view().theme);
        }
        if changes.section {
            self.rig.focus(self.view().section);
        }
        if output.reload {
            self.reload();
        }
        changes
    }

    /// Recomposes the room with the session seed and leaves the failed state
    pub fn reload(&mut self) {
        let view = *self.shell.view();
        self.room = Self::compose(&self.config, self.seed, &view, &mut self.scheduler);
        self.rig = CameraRig::new(&self.room.geometry, view.section, self.config.animation.camera_ease);
        self.batches.clear();
        self.shell.reload();
    }
}
