use serde::{Deserialize, Serialize};

/// Logical ground state, as opposed to the raw per-query grounded flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroundState {
    Grounded,
    #[default]
    Airborne,
}

/// Vertical motion of the actor between ticks.
///
/// Starts airborne with nothing accumulated; the first resolver report
/// decides whether the actor is standing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    pub vertical_speed: f32,
    pub ground: GroundState,
    /// Seconds of continuous ungrounded reports while logically grounded
    pub grace_timer: f32,
}

impl MotionState {
    pub fn is_grounded(&self) -> bool {
        self.ground == GroundState::Grounded
    }
}
