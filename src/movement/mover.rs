//! Horizontal walking relative to the body's facing.

use glam::{Vec2, Vec3};

use super::pose::ActorPose;

/// Cap an intent at unit length so diagonals are no faster than straights.
pub fn normalize_intent(intent: Vec2) -> Vec2 {
    if intent.length() > 1.0 {
        intent.normalize()
    } else {
        intent
    }
}

/// World-space displacement for one tick of walking.
///
/// Intent `x` strafes right, intent `y` walks forward. At yaw 0 forward is
/// +Z and right is +X; the result always lies on the horizontal plane.
pub fn horizontal_displacement(intent: Vec2, yaw_degrees: f32, walk_speed: f32, dt: f32) -> Vec3 {
    let intent = normalize_intent(intent) * walk_speed * dt;
    let local = Vec3::new(intent.x, 0.0, intent.y);
    ActorPose::new(Vec3::ZERO, yaw_degrees).body_rotation() * local
}
