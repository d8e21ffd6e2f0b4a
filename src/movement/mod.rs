//! First-person movement.
//!
//! This module implements a small kinematic walker:
//!
//! - Walking relative to the body's facing, capped at unit intent
//! - Mouse-look with wrapped yaw and clamped pitch
//! - Gravity with terminal speed, jumping, and a grounded grace window
//!
//! # Design
//!
//! The [`MovementController`] owns an [`ActorPose`] and a [`MotionState`] and
//! advances them once per tick. Collision, input and camera are collaborators
//! passed in at build time, never looked up globally.

pub mod controller;
pub mod events;
pub mod gravity;
pub mod look;
pub mod mover;
pub mod pose;
pub mod state;

pub use controller::{MovementController, MovementControllerBuilder, TickReport};
pub use events::{MovementEvent, MovementEventRecorder};
pub use gravity::GroundTransition;
pub use look::OrientationSink;
pub use pose::ActorPose;
pub use state::{GroundState, MotionState};
