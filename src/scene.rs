use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::vec3_serde;
use crate::error::ControllerError;
use crate::physics::PhysicsWorld;

/// Axis-aligned static box in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneBlock {
    pub name: String,
    #[serde(with = "vec3_serde")]
    pub center: Vec3,
    #[serde(with = "vec3_serde")]
    pub half_extents: Vec3,
}

impl SceneBlock {
    pub fn new(name: &str, center: Vec3, half_extents: Vec3) -> Self {
        Self {
            name: name.to_string(),
            center,
            half_extents,
        }
    }

    /// Height of the block's top face
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

/// Serializable level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneData {
    pub blocks: Vec<SceneBlock>,
}

impl SceneData {
    /// Load from JSON file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading scene {path}"))?;
        let data: SceneData =
            serde_json::from_str(&content).with_context(|| format!("parsing scene {path}"))?;
        Ok(data)
    }

    /// Save to JSON file with pretty formatting
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load the scene, writing out the default level only if the file is missing
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            return Self::load(path);
        }

        log::warn!("scene {path} not found, writing default level");
        let scene_data = Self::default();
        if let Err(e) = scene_data.save(path) {
            log::warn!("could not write default scene ({e:#})");
        }
        Ok(scene_data)
    }

    /// Build a collision world containing every block
    pub fn build_world(&self) -> Result<PhysicsWorld, ControllerError> {
        let mut world = PhysicsWorld::new();
        for block in &self.blocks {
            if block.half_extents.cmple(Vec3::ZERO).any() {
                return Err(ControllerError::DegenerateBlock {
                    name: block.name.clone(),
                });
            }
            world.add_static_box(block.center, block.half_extents);
        }
        log::info!("scene built with {} blocks", world.collider_count());
        Ok(world)
    }
}

impl Default for SceneData {
    /// A floor, a low platform, a wall to walk into and a ceiling over part
    /// of the floor to bump a jump against.
    fn default() -> Self {
        Self {
            blocks: vec![
                SceneBlock::new("floor", Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0)),
                SceneBlock::new("step", Vec3::new(6.0, 0.25, 0.0), Vec3::new(2.0, 0.25, 2.0)),
                SceneBlock::new("north_wall", Vec3::new(0.0, 2.0, 12.0), Vec3::new(10.0, 2.0, 0.5)),
                SceneBlock::new(
                    "low_ceiling",
                    Vec3::new(-6.0, 2.75, 0.0),
                    Vec3::new(2.0, 0.25, 2.0),
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_builds() {
        let scene = SceneData::default();
        let world = scene.build_world().unwrap();
        assert_eq!(world.collider_count(), 4);

        let floor = world.ground_below(Vec3::new(0.0, 5.0, -3.0), 10.0).unwrap();
        assert!(floor.abs() < 1e-3);
    }

    #[test]
    fn degenerate_block_is_rejected() {
        let scene = SceneData {
            blocks: vec![SceneBlock::new("flat", Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0))],
        };
        assert_eq!(
            scene.build_world().err(),
            Some(ControllerError::DegenerateBlock {
                name: "flat".to_string()
            })
        );
    }

    #[test]
    fn test_save_load() {
        let scene = SceneData::default();
        let path = std::env::temp_dir().join("fps_walker_test_scene.json");
        let path = path.to_str().unwrap();

        scene.save(path).unwrap();
        let loaded = SceneData::load(path).unwrap();
        assert_eq!(loaded.blocks.len(), scene.blocks.len());
        assert_eq!(loaded.blocks[1].top(), 0.5);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn broken_scene_file_is_an_error_and_kept() {
        let path = std::env::temp_dir().join("fps_walker_test_broken_scene.json");
        let path = path.to_str().unwrap();
        std::fs::write(path, "{ \"blocks\": [ {").unwrap();

        assert!(SceneData::load_or_default(path).is_err());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{ \"blocks\": [ {");

        let _ = std::fs::remove_file(path);
    }
}
