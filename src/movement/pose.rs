use glam::{Quat, Vec3};

/// Pitch limit in degrees, either side of level.
pub const PITCH_LIMIT: f32 = 89.0;

/// Where the actor is and which way it faces.
///
/// Yaw belongs to the body and is kept in `[0, 360)`. Pitch belongs to the
/// head and is kept in `[-89, 89]`. Both are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl ActorPose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw: wrap_degrees(yaw),
            pitch: 0.0,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = wrap_degrees(yaw);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = clamp_pitch(pitch);
    }

    /// Body rotation about world up.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Body rotation followed by head pitch.
    pub fn head_rotation(&self) -> Quat {
        self.body_rotation() * Quat::from_rotation_x(self.pitch.to_radians())
    }
}

impl Default for ActorPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

/// Wrap an angle into `[0, 360)`, however many turns away it is.
pub fn wrap_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}
