use glam::{Mat4, Quat, Vec3};

use crate::movement::OrientationSink;

/// First-person head camera riding on the actor's body
///
/// Yaw comes from the body and pitch from the head. Forward is +Z, right is
/// +X and up is +Y (left-handed, matching the movement basis).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    position: Vec3,
    /// Body yaw in degrees
    yaw: f32,
    /// Head pitch in degrees, positive looks down
    pitch: f32,
    /// Eye height above the actor's feet
    eye_height: f32,
    /// Field of view in radians
    fov: f32,
    /// Near clipping plane distance
    near_plane: f32,
    /// Far clipping plane distance
    far_plane: f32,
}

impl Camera {
    /// Create a new camera with default projection settings
    pub fn new(eye_height: f32) -> Self {
        Self {
            position: Vec3::Y * eye_height,
            yaw: 0.0,
            pitch: 0.0,
            eye_height,
            fov: 70.0_f32.to_radians(),
            near_plane: 0.05,
            far_plane: 1000.0,
        }
    }

    /// Get the eye position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Place the eye above the actor's feet
    pub fn follow(&mut self, feet: Vec3) {
        self.position = feet + Vec3::Y * self.eye_height;
    }

    /// Body rotation only (what the legs see)
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Full head rotation: body yaw, then head pitch
    pub fn rotation(&self) -> Quat {
        self.body_rotation() * Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Direction the eye looks along
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Strafe direction, always horizontal
    pub fn right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }

    /// Get the view matrix for rendering
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = self.rotation();
        Mat4::look_to_lh(self.position, rotation * Vec3::Z, rotation * Vec3::Y)
    }

    /// Get the projection matrix for rendering
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov, aspect_ratio, self.near_plane, self.far_plane)
    }

    /// Get field of view in radians
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Set all projection parameters at once
    pub fn set_projection(&mut self, fov: f32, near_plane: f32, far_plane: f32) {
        self.fov = fov;
        self.near_plane = near_plane;
        self.far_plane = far_plane;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(crate::config::CameraConfigData::default().eye_height)
    }
}

impl From<&crate::config::CameraConfigData> for Camera {
    fn from(data: &crate::config::CameraConfigData) -> Self {
        let mut camera = Self::new(data.eye_height);
        camera.set_projection(data.fov.to_radians(), data.near_plane, data.far_plane);
        camera
    }
}

impl OrientationSink for Camera {
    fn apply_body_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn apply_head_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }
}
