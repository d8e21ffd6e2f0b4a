/// Physics integration with Rapier
///
/// Provides:
/// - A static collision world (ground slabs, walls, ceilings)
/// - Swept-capsule character movement through rapier's kinematic controller
/// - Raycasts for spawn placement

use glam::Vec3;
use nalgebra as na;
use rapier3d::control::KinematicCharacterController;
use rapier3d::prelude::*;

use super::{contacts_from_shortfall, CollisionResolver, MoveOutcome};

/// Static collision world wrapper
pub struct PhysicsWorld {
    /// Rapier rigid body set (only fixed bodies live here)
    pub rigid_body_set: RigidBodySet,

    /// Rapier collider set
    pub collider_set: ColliderSet,

    /// Integration parameters; `dt` is handed to the character controller
    pub integration_params: IntegrationParameters,

    /// Query pipeline for raycasts and shape casts
    pub query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let mut integration_params = IntegrationParameters::default();
        integration_params.dt = 1.0 / 60.0;

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_params,
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Add a fixed box, centred at `center`
    pub fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .position(vec3_to_isometry(center))
            .build();
        let rb_handle = self.rigid_body_set.insert(rigid_body);

        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        let handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        self.refresh();
        handle
    }

    /// Add a wide slab whose top face sits at `height`
    pub fn add_ground(&mut self, height: f32, half_size: f32) -> ColliderHandle {
        const THICKNESS: f32 = 0.5;
        self.add_static_box(
            Vec3::new(0.0, height - THICKNESS, 0.0),
            Vec3::new(half_size, THICKNESS, half_size),
        )
    }

    /// Rebuild acceleration structures after colliders change
    pub fn refresh(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Raycast, returning the hit distance
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let ray = Ray::new(vec3_to_point(origin), vec3_to_vector(direction.normalize()));

        let (_, toi) = self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            QueryFilter::default(),
        )?;

        Some(toi)
    }

    /// Height of the first surface straight below `point`, if any
    pub fn ground_below(&self, point: Vec3, max_distance: f32) -> Option<f32> {
        self.raycast(point, Vec3::NEG_Y, max_distance)
            .map(|toi| point.y - toi)
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Capsule character moved through a `PhysicsWorld`.
///
/// Positions handed in are the character's feet; the capsule is placed so
/// its bottom touches that point.
pub struct RapierResolver {
    world: PhysicsWorld,
    controller: KinematicCharacterController,
    shape: SharedShape,
    radius: f32,
    half_height: f32,
}

impl RapierResolver {
    /// `height` is the full capsule height, caps included
    pub fn new(world: PhysicsWorld, radius: f32, height: f32) -> Self {
        let half_height = (height * 0.5 - radius).max(0.0);
        let controller = KinematicCharacterController {
            // Vertical motion is owned by the gravity state machine
            snap_to_ground: None,
            ..KinematicCharacterController::default()
        };

        Self {
            world,
            controller,
            shape: SharedShape::capsule_y(half_height, radius),
            radius,
            half_height,
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    fn capsule_center(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::Y * (self.half_height + self.radius)
    }
}

impl CollisionResolver for RapierResolver {
    fn move_and_collide(&mut self, position: Vec3, displacement: Vec3) -> MoveOutcome {
        let character_pos = vec3_to_isometry(self.capsule_center(position));

        let movement = self.controller.move_shape(
            self.world.integration_params.dt,
            &self.world.rigid_body_set,
            &self.world.collider_set,
            &self.world.query_pipeline,
            &*self.shape,
            &character_pos,
            vec3_to_vector(displacement),
            QueryFilter::default(),
            |_| {},
        );

        let applied = vector_to_vec3(&movement.translation);
        MoveOutcome {
            applied,
            contacts: contacts_from_shortfall(displacement, applied),
            grounded: movement.grounded,
        }
    }
}

/// Convert Vec3 to Rapier Isometry (translation only)
fn vec3_to_isometry(v: Vec3) -> Isometry<Real> {
    Isometry::from_parts(
        Translation::new(v.x, v.y, v.z),
        na::UnitQuaternion::identity(),
    )
}

/// Convert Vec3 to Rapier Point
fn vec3_to_point(v: Vec3) -> Point<Real> {
    Point::new(v.x, v.y, v.z)
}

/// Convert Vec3 to Rapier Vector
fn vec3_to_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

fn vector_to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_below_finds_slab_top() {
        let mut world = PhysicsWorld::new();
        world.add_ground(2.0, 50.0);

        let height = world.ground_below(Vec3::new(1.0, 10.0, -3.0), 100.0).unwrap();
        assert!((height - 2.0).abs() < 1e-3);
        assert!(world.ground_below(Vec3::new(0.0, 0.5, 0.0), 100.0).is_none());
    }

    #[test]
    fn falling_capsule_stops_on_ground() {
        let mut world = PhysicsWorld::new();
        world.add_ground(0.0, 50.0);
        let mut resolver = RapierResolver::new(world, 0.4, 1.8);

        let out = resolver.move_and_collide(Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(out.applied.y > -0.25);
        assert!(out.contacts.below);
        assert!(out.grounded);
    }
}
