use anyhow::{bail, Context};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::WalkerConfig;
use crate::core::Camera;
use crate::input::InputSampler;
use crate::movement::{ActorPose, MotionState, MovementController};
use crate::physics::RapierResolver;
use crate::scene::SceneData;

/// Fixed simulation rate of the headless loop
pub const TICK_HZ: f32 = 60.0;

/// Longest headless run accepted, in simulated seconds
pub const MAX_RUN_SECONDS: f32 = 3600.0;

/// Character capsule used by the headless loop
const CAPSULE_RADIUS: f32 = 0.4;
const CAPSULE_HEIGHT: f32 = 1.8;
/// Spawns are placed this far above the ground so the capsule starts clear
const SPAWN_LIFT: f32 = 0.05;

/// Number of fixed ticks covering `seconds` of simulated time.
pub fn ticks_for(seconds: f32) -> anyhow::Result<u64> {
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("run length must be a finite, non-negative number of seconds, got {seconds}");
    }
    if seconds > MAX_RUN_SECONDS {
        bail!("run length {seconds}s exceeds the {MAX_RUN_SECONDS}s limit");
    }
    Ok((seconds * TICK_HZ).round() as u64)
}

/// Final state of a headless run
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u64,
    pub pose: ActorPose,
    pub motion: MotionState,
    pub eye: Vec3,
}

/// Headless driver: one controller walking through a scene at a fixed rate.
pub struct Engine {
    controller: MovementController,
    camera: Rc<RefCell<Camera>>,
    timestep: f32,
}

impl Engine {
    pub fn new(
        config: &WalkerConfig,
        scene: &SceneData,
        input: impl InputSampler + 'static,
    ) -> anyhow::Result<Self> {
        let mut world = scene.build_world().context("building collision world")?;
        world.integration_params.dt = 1.0 / TICK_HZ;

        // Drop the spawn point onto whatever is below it
        let spawn = world
            .ground_below(config.spawn.position + Vec3::Y, 100.0)
            .map(|height| {
                Vec3::new(
                    config.spawn.position.x,
                    height + SPAWN_LIFT,
                    config.spawn.position.z,
                )
            })
            .unwrap_or(config.spawn.position);

        let resolver = RapierResolver::new(world, CAPSULE_RADIUS, CAPSULE_HEIGHT);

        let camera = Rc::new(RefCell::new(Camera::from(&config.camera)));
        camera.borrow_mut().follow(spawn);

        let controller = MovementController::builder()
            .config(config.movement)
            .spawn(spawn, config.spawn.yaw)
            .input(input)
            .resolver(resolver)
            .orientation(camera.clone())
            .build()
            .context("building movement controller")?;

        Ok(Self {
            controller,
            camera,
            timestep: 1.0 / TICK_HZ,
        })
    }

    pub fn controller(&self) -> &MovementController {
        &self.controller
    }

    pub fn camera(&self) -> std::cell::Ref<'_, Camera> {
        self.camera.borrow()
    }

    /// Run for `seconds` of simulated time, logging a snapshot every second
    pub fn run(&mut self, seconds: f32) -> anyhow::Result<RunSummary> {
        let ticks = ticks_for(seconds)?;
        let snapshot_every = TICK_HZ as u64;

        for _ in 0..ticks {
            let report = self.controller.tick(self.timestep);
            self.camera.borrow_mut().follow(report.pose.position);

            if report.tick % snapshot_every == 0 {
                log::info!(
                    "t={:.2}s pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} {:?} vy={:.2}",
                    report.tick as f32 * self.timestep,
                    report.pose.position.x,
                    report.pose.position.y,
                    report.pose.position.z,
                    report.pose.yaw(),
                    report.pose.pitch(),
                    report.motion.ground,
                    report.motion.vertical_speed,
                );
            }
        }

        Ok(RunSummary {
            ticks: self.controller.tick_count(),
            pose: *self.controller.pose(),
            motion: *self.controller.motion(),
            eye: self.camera.borrow().position(),
        })
    }
}
