/// Collision resolution for the walker
///
/// Provides:
/// - The `CollisionResolver` seam the movement controller moves through
/// - A rapier-backed resolver for real level geometry
/// - An analytic flat-ground resolver for headless runs and tests

pub mod flat;
pub mod world;

pub use flat::FlatGround;
pub use world::{PhysicsWorld, RapierResolver};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which sides of the character touched something during one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactFlags {
    pub above: bool,
    pub below: bool,
    pub sides: bool,
}

impl ContactFlags {
    pub const NONE: Self = Self {
        above: false,
        below: false,
        sides: false,
    };

    /// Contact on the vertical axis (ceiling or floor)
    pub fn vertical(&self) -> bool {
        self.above || self.below
    }

    pub fn any(&self) -> bool {
        self.above || self.below || self.sides
    }
}

/// Result of asking a resolver to move the character.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveOutcome {
    /// Displacement that was actually applied
    pub applied: Vec3,
    pub contacts: ContactFlags,
    /// Whether the character stands on something after the move
    pub grounded: bool,
}

/// Swept-shape collision query used for every displacement the controller makes.
///
/// The resolver does not own the character's position; it is told where the
/// character is and what it wants to do, and answers with what it may do.
pub trait CollisionResolver {
    fn move_and_collide(&mut self, position: Vec3, displacement: Vec3) -> MoveOutcome;
}

impl<T: CollisionResolver + ?Sized> CollisionResolver for Box<T> {
    fn move_and_collide(&mut self, position: Vec3, displacement: Vec3) -> MoveOutcome {
        (**self).move_and_collide(position, displacement)
    }
}

/// Below this, a shortfall between requested and applied motion is noise.
pub(crate) const CONTACT_EPSILON: f32 = 1e-4;

/// Derive contact flags from how much of a move was blocked on each axis.
pub(crate) fn contacts_from_shortfall(requested: Vec3, applied: Vec3) -> ContactFlags {
    let blocked_up = requested.y > 0.0 && applied.y < requested.y - CONTACT_EPSILON;
    let blocked_down = requested.y < 0.0 && applied.y > requested.y + CONTACT_EPSILON;

    let wanted = Vec3::new(requested.x, 0.0, requested.z);
    let got = Vec3::new(applied.x, 0.0, applied.z);
    let blocked_side = wanted.length() > CONTACT_EPSILON
        && (wanted - got).length() > CONTACT_EPSILON;

    ContactFlags {
        above: blocked_up,
        below: blocked_down,
        sides: blocked_side,
    }
}
