//! First-person walker
//!
//! A kinematic movement model for a single first-person actor: walking
//! relative to facing, mouse-look, gravity and jumping with a grounded grace
//! window. Collision, input, camera and cursor are injected collaborators.

pub mod config;
pub mod core;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod input;
pub mod movement;
pub mod physics;
pub mod scene;

pub use config::{MovementConfig, VerticalContactPolicy, WalkerConfig};
pub use error::ControllerError;
pub use input::{InputFrame, InputSampler, ScriptedInput};
pub use movement::{
    ActorPose, GroundState, MotionState, MovementController, OrientationSink, TickReport,
};
pub use physics::{CollisionResolver, ContactFlags, FlatGround, MoveOutcome, RapierResolver};
