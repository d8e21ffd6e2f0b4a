//! Mouse-look: yaw turns the body, pitch tilts the head.

use glam::Vec2;

use super::pose::ActorPose;

/// Receives the orientation produced each tick.
///
/// Yaw goes to the body, pitch goes to the head or camera only. Angles are
/// in degrees.
pub trait OrientationSink {
    fn apply_body_yaw(&mut self, yaw: f32);
    fn apply_head_pitch(&mut self, pitch: f32);
}

impl<T: OrientationSink + ?Sized> OrientationSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn apply_body_yaw(&mut self, yaw: f32) {
        self.borrow_mut().apply_body_yaw(yaw);
    }

    fn apply_head_pitch(&mut self, pitch: f32) {
        self.borrow_mut().apply_head_pitch(pitch);
    }
}

/// Accumulate a look delta into the pose.
///
/// Horizontal delta turns right for positive values and wraps without limit.
/// Vertical delta looks up for positive values and stops at the pitch limit.
pub fn apply_look(pose: &mut ActorPose, delta: Vec2, sensitivity: f32) {
    pose.set_yaw(pose.yaw() + delta.x * sensitivity);
    pose.set_pitch(pose.pitch() - delta.y * sensitivity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn yaw_wraps_across_many_turns() {
        let mut pose = ActorPose::new(Vec3::ZERO, 350.0);
        apply_look(&mut pose, Vec2::new(100.0, 0.0), 0.2);
        assert!((pose.yaw() - 10.0).abs() < 1e-3);

        apply_look(&mut pose, Vec2::new(-20_000.0, 0.0), 0.2);
        assert!((0.0..360.0).contains(&pose.yaw()));
    }

    #[test]
    fn pitch_is_inverted_and_clamped() {
        let mut pose = ActorPose::default();
        apply_look(&mut pose, Vec2::new(0.0, 50.0), 0.2);
        assert!((pose.pitch() + 10.0).abs() < 1e-4);

        apply_look(&mut pose, Vec2::new(0.0, 10_000.0), 0.2);
        assert_eq!(pose.pitch(), -89.0);

        apply_look(&mut pose, Vec2::new(0.0, -10_000.0), 0.2);
        assert_eq!(pose.pitch(), 89.0);
    }

    #[test]
    fn pitch_does_not_touch_yaw() {
        let mut pose = ActorPose::new(Vec3::ZERO, 45.0);
        apply_look(&mut pose, Vec2::new(0.0, 30.0), 1.0);
        assert_eq!(pose.yaw(), 45.0);
    }
}
