use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ControllerError;

/// Complete walker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfigData,
    pub spawn: SpawnConfigData,
}

impl WalkerConfig {
    /// Load configuration from JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config: WalkerConfig =
            serde_json::from_str(&content).with_context(|| format!("parsing config {path}"))?;
        config.movement.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file with pretty formatting
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration, writing out the defaults only if the file is missing.
    /// A file that exists but fails to parse or validate is an error and is
    /// left untouched.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            return Self::load(path);
        }

        log::warn!("config {path} not found, writing defaults");
        let config = Self::default();
        if let Err(e) = config.save(path) {
            log::warn!("could not write default config ({e:#})");
        }
        Ok(config)
    }
}

/// What happens to vertical speed when the vertical move reports a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalContactPolicy {
    /// Any contact above or below zeroes vertical speed.
    #[default]
    ZeroOnAnyContact,
    /// A ceiling only cancels rising speed, a floor only cancels falling speed.
    Directional,
}

/// Per-actor movement tunables. Validated once, never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed in units per second at full intent
    pub walk_speed: f32,
    /// Degrees of rotation per unit of look delta
    pub look_sensitivity: f32,
    pub gravity: f32,
    /// Tuned factor applied on top of `gravity`. Kept at 5 for feel parity.
    pub gravity_multiplier: f32,
    /// Maximum downward speed magnitude
    pub terminal_speed: f32,
    pub jump_speed: f32,
    /// Seconds of ungrounded reports tolerated before leaving the ground
    pub grounded_grace: f32,
    pub vertical_contact: VerticalContactPolicy,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            look_sensitivity: 0.2,
            gravity: 10.0,
            gravity_multiplier: 5.0,
            terminal_speed: 20.0,
            jump_speed: 10.0,
            grounded_grace: 0.3,
            vertical_contact: VerticalContactPolicy::ZeroOnAnyContact,
        }
    }
}

impl MovementConfig {
    /// Reject any tunable that is not finite and strictly positive.
    pub fn validate(&self) -> Result<(), ControllerError> {
        let tunables = [
            ("walk_speed", self.walk_speed),
            ("look_sensitivity", self.look_sensitivity),
            ("gravity", self.gravity),
            ("gravity_multiplier", self.gravity_multiplier),
            ("terminal_speed", self.terminal_speed),
            ("jump_speed", self.jump_speed),
            ("grounded_grace", self.grounded_grace),
        ];
        for (name, value) in tunables {
            if !value.is_finite() || value <= 0.0 {
                return Err(ControllerError::InvalidTunable { name, value });
            }
        }
        Ok(())
    }

    /// Downward acceleration actually applied each tick
    pub fn effective_gravity(&self) -> f32 {
        self.gravity * self.gravity_multiplier
    }
}

/// Head camera configuration (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfigData {
    /// Height of the eye above the actor's position
    pub eye_height: f32,
    pub fov: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfigData {
    fn default() -> Self {
        Self {
            eye_height: 0.8,
            fov: 70.0,
            near_plane: 0.05,
            far_plane: 1000.0,
        }
    }
}

/// Where the actor enters the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfigData {
    #[serde(with = "vec3_serde")]
    pub position: Vec3,
    /// Initial body yaw in degrees
    pub yaw: f32,
}

impl Default for SpawnConfigData {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
        }
    }
}

/// Custom serialization for Vec3
pub(crate) mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Vec3Data {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S>(vec: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Vec3Data {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = Vec3Data::deserialize(deserializer)?;
        Ok(Vec3::new(data.x, data.y, data.z))
    }
}
