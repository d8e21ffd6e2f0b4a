//! First-person movement controller.
//!
//! Owns the actor's pose and vertical motion and advances them once per
//! simulation tick from sampled input, moving through an injected collision
//! resolver.

use glam::Vec3;

use crate::config::MovementConfig;
use crate::cursor::{CursorControl, CursorGuard};
use crate::error::ControllerError;
use crate::input::{sanitize, InputSampler};
use crate::physics::{CollisionResolver, MoveOutcome};

use super::events::{MovementEvent, MovementEventRecorder};
use super::gravity::{
    integrate_gravity, resolve_vertical_contact, try_jump, update_ground_state, GroundTransition,
};
use super::look::{apply_look, OrientationSink};
use super::mover::horizontal_displacement;
use super::pose::ActorPose;
use super::state::MotionState;

/// What happened during one call to [`MovementController::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub jumped: bool,
    /// Outcome of the walking move
    pub horizontal: MoveOutcome,
    /// Outcome of the gravity move
    pub vertical: MoveOutcome,
    pub transition: Option<GroundTransition>,
    pub pose: ActorPose,
    pub motion: MotionState,
}

/// Kinematic walker for a single actor.
///
/// # Example
///
/// ```ignore
/// let mut controller = MovementController::builder()
///     .config(MovementConfig::default())
///     .input(sampler)
///     .resolver(FlatGround::new(0.0))
///     .build()?;
///
/// // Each frame:
/// controller.tick(delta_time);
/// ```
pub struct MovementController {
    config: MovementConfig,
    pose: ActorPose,
    motion: MotionState,
    input: Box<dyn InputSampler>,
    resolver: Box<dyn CollisionResolver>,
    orientation: Option<Box<dyn OrientationSink>>,
    events: MovementEventRecorder,
    tick: u64,
    // Dropped with the controller, releasing the cursor
    _cursor: Option<CursorGuard>,
}

impl MovementController {
    pub fn builder() -> MovementControllerBuilder {
        MovementControllerBuilder::default()
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn pose(&self) -> &ActorPose {
        &self.pose
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn events(&self) -> &MovementEventRecorder {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut MovementEventRecorder {
        &mut self.events
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Start a jump if the actor is grounded. A no-op while airborne.
    pub fn jump(&mut self) -> bool {
        if !try_jump(&mut self.motion, self.config.jump_speed) {
            return false;
        }
        log::debug!("jump at tick {}", self.tick);
        self.events.record(MovementEvent::Jumped {
            tick: self.tick,
            vertical_speed: self.motion.vertical_speed,
        });
        true
    }

    /// Advance one simulation tick: jump, then move, then look, then gravity.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        self.tick += 1;
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("tick {}: invalid delta time {dt}, using 0", self.tick);
            0.0
        };

        let (frame, repaired) = sanitize(self.input.sample());
        if repaired.any() {
            log::warn!(
                "tick {}: non-finite input replaced (move: {}, look: {})",
                self.tick,
                repaired.movement,
                repaired.look
            );
            self.events.record(MovementEvent::InputSanitized {
                tick: self.tick,
                movement: repaired.movement,
                look: repaired.look,
            });
        }

        let jumped = frame.jump && self.jump();
        let horizontal = self.update_moving(frame.movement, dt);
        self.update_looking(frame.look);
        let (vertical, transition) = self.update_gravity(dt);

        TickReport {
            tick: self.tick,
            jumped,
            horizontal,
            vertical,
            transition,
            pose: self.pose,
            motion: self.motion,
        }
    }

    fn update_moving(&mut self, intent: glam::Vec2, dt: f32) -> MoveOutcome {
        let displacement =
            horizontal_displacement(intent, self.pose.yaw(), self.config.walk_speed, dt);
        let outcome = self
            .resolver
            .move_and_collide(self.pose.position, displacement);
        self.pose.position += outcome.applied;
        outcome
    }

    fn update_looking(&mut self, delta: glam::Vec2) {
        apply_look(&mut self.pose, delta, self.config.look_sensitivity);

        if let Some(sink) = self.orientation.as_mut() {
            sink.apply_body_yaw(self.pose.yaw());
            sink.apply_head_pitch(self.pose.pitch());
        }
    }

    fn update_gravity(&mut self, dt: f32) -> (MoveOutcome, Option<GroundTransition>) {
        integrate_gravity(&mut self.motion, &self.config, dt);
        let falling_speed = self.motion.vertical_speed;

        let displacement = Vec3::Y * (self.motion.vertical_speed * dt);
        let outcome = self
            .resolver
            .move_and_collide(self.pose.position, displacement);
        self.pose.position += outcome.applied;

        if let Some(cancelled) = resolve_vertical_contact(
            &mut self.motion,
            outcome.contacts,
            self.config.vertical_contact,
        ) {
            // Resting on the floor cancels gravity every tick; only log the
            // interesting ones.
            if outcome.contacts.above || !self.motion.is_grounded() {
                self.events.record(MovementEvent::VerticalContact {
                    tick: self.tick,
                    above: outcome.contacts.above,
                    below: outcome.contacts.below,
                    cancelled_speed: cancelled,
                });
            }
        }

        let transition = update_ground_state(
            &mut self.motion,
            outcome.grounded,
            self.config.grounded_grace,
            dt,
        );
        match transition {
            Some(GroundTransition::Landed) => {
                log::debug!("landed at tick {} ({falling_speed:.2} m/s)", self.tick);
                self.events.record(MovementEvent::Landed {
                    tick: self.tick,
                    impact_speed: falling_speed,
                });
            }
            Some(GroundTransition::LeftGround) => {
                log::debug!("left ground at tick {}", self.tick);
                self.events
                    .record(MovementEvent::LeftGround { tick: self.tick });
            }
            None => {}
        }

        (outcome, transition)
    }
}

/// Assembles a [`MovementController`], checking its collaborators and tunables.
#[derive(Default)]
pub struct MovementControllerBuilder {
    config: MovementConfig,
    spawn: ActorPose,
    input: Option<Box<dyn InputSampler>>,
    resolver: Option<Box<dyn CollisionResolver>>,
    orientation: Option<Box<dyn OrientationSink>>,
    cursor: Option<Box<dyn CursorControl>>,
}

impl MovementControllerBuilder {
    pub fn config(mut self, config: MovementConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial feet position and body yaw (degrees)
    pub fn spawn(mut self, position: Vec3, yaw: f32) -> Self {
        self.spawn = ActorPose::new(position, yaw);
        self
    }

    pub fn input(mut self, input: impl InputSampler + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn resolver(mut self, resolver: impl CollisionResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn orientation(mut self, sink: impl OrientationSink + 'static) -> Self {
        self.orientation = Some(Box::new(sink));
        self
    }

    /// Cursor to hold locked for the controller's lifetime
    pub fn cursor(mut self, cursor: impl CursorControl + 'static) -> Self {
        self.cursor = Some(Box::new(cursor));
        self
    }

    pub fn build(self) -> Result<MovementController, ControllerError> {
        self.config.validate()?;
        let input = self
            .input
            .ok_or(ControllerError::MissingCollaborator("input sampler"))?;
        let resolver = self
            .resolver
            .ok_or(ControllerError::MissingCollaborator("collision resolver"))?;

        let mut orientation = self.orientation;
        if let Some(sink) = orientation.as_mut() {
            sink.apply_body_yaw(self.spawn.yaw());
            sink.apply_head_pitch(self.spawn.pitch());
        }

        log::info!(
            "movement controller ready at {:?}, yaw {:.1}",
            self.spawn.position,
            self.spawn.yaw()
        );

        Ok(MovementController {
            config: self.config,
            pose: self.spawn,
            motion: MotionState::default(),
            input,
            resolver,
            orientation,
            events: MovementEventRecorder::new(),
            tick: 0,
            _cursor: self.cursor.map(CursorGuard::lock),
        })
    }
}
