use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::Camera;

/// Errors from loading a [`ViewportConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Planar movement and vertical physics. All rates are per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub gravity: f32,
    pub floor_y: f32,
    pub jump_power: f32,
    /// How close to the floor the camera must be for a jump to fire.
    pub jump_epsilon: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.15,
            gravity: -0.045,
            floor_y: 0.0,
            jump_power: 0.85,
            jump_epsilon: 0.01,
        }
    }
}

/// Look sensitivities, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of yaw per pixel of horizontal drag.
    pub pointer_sensitivity_x: f32,
    /// Degrees of pitch per pixel of vertical drag.
    pub pointer_sensitivity_y: f32,
    /// Degrees per frame at full right-stick deflection.
    pub gamepad_gain: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            pointer_sensitivity_x: 0.25,
            pointer_sensitivity_y: 0.25,
            gamepad_gain: 2.0,
            pitch_limit: 89.0,
        }
    }
}

/// Every tunable of the viewport. Missing fields in a config document fall
/// back to these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub movement: MovementConfig,
    pub look: LookConfig,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Camera pose at startup.
    pub spawn: Camera,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            look: LookConfig::default(),
            fov_degrees: 38.0,
            spawn: Camera::default(),
        }
    }
}

impl ViewportConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
