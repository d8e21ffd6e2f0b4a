use glam::Vec3;

use super::{contacts_from_shortfall, CollisionResolver, MoveOutcome};

/// Analytic resolver: an infinite floor, an optional ceiling, nothing else.
///
/// `position` is the character's feet. The character is `height` tall, so the
/// ceiling blocks once the head would pass it.
#[derive(Debug, Clone)]
pub struct FlatGround {
    pub floor_height: f32,
    pub ceiling_height: Option<f32>,
    pub height: f32,
    /// Distance above the floor that still counts as standing on it
    pub snap_distance: f32,
}

impl FlatGround {
    pub fn new(floor_height: f32) -> Self {
        Self {
            floor_height,
            ceiling_height: None,
            height: 1.8,
            snap_distance: 0.01,
        }
    }

    pub fn with_ceiling(mut self, ceiling_height: f32) -> Self {
        self.ceiling_height = Some(ceiling_height);
        self
    }
}

impl CollisionResolver for FlatGround {
    fn move_and_collide(&mut self, position: Vec3, displacement: Vec3) -> MoveOutcome {
        let mut target = position + displacement;

        if target.y < self.floor_height {
            target.y = self.floor_height;
        }
        if let Some(ceiling) = self.ceiling_height {
            let max_feet = (ceiling - self.height).max(self.floor_height);
            if target.y > max_feet {
                target.y = max_feet;
            }
        }

        let applied = target - position;
        let contacts = contacts_from_shortfall(displacement, applied);
        let grounded = target.y <= self.floor_height + self.snap_distance;

        MoveOutcome {
            applied,
            contacts,
            grounded,
        }
    }
}
