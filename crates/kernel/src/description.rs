use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use viewport_common::Color;

use crate::scene::{NodeId, PartOverrides, Scene, SceneError};

/// Errors from loading a scene description.
#[derive(Debug, thiserror::Error)]
pub enum SceneFileError {
    #[error("failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A part and the parts nested under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartDescription {
    #[serde(flatten)]
    pub properties: PartOverrides,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PartDescription>,
}

/// JSON description of the parts under the workspace.
///
/// ```json
/// { "parts": [ { "Color": "#ff0000", "Position": [0, 0, -10], "Children": [] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub parts: Vec<PartDescription>,
}

impl SceneDescription {
    pub fn from_json_str(text: &str) -> Result<Self, SceneFileError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// A small scene of coloured parts in front of the default camera.
    pub fn demo() -> Self {
        let part = |color: &str, size: [f32; 3], position: [f32; 3], rotation: [f32; 3]| {
            PartDescription {
                properties: PartOverrides {
                    color: Some(Color::new(color)),
                    size: Some(Vec3::from_array(size)),
                    position: Some(Vec3::from_array(position)),
                    rotation: Some(Vec3::from_array(rotation)),
                    ..Default::default()
                },
                children: Vec::new(),
            }
        };
        Self {
            parts: vec![
                part("#3a3f44", [40.0, 0.5, 40.0], [0.0, -1.5, -10.0], [0.0; 3]),
                part("#e74c3c", [2.0, 2.0, 2.0], [0.0, 0.0, -10.0], [0.0; 3]),
                part("#3498db", [3.0, 1.0, 3.0], [-5.0, 0.0, -14.0], [0.0, 30.0, 0.0]),
                part("#2ecc71", [1.5, 4.0, 1.5], [5.0, 1.0, -8.0], [15.0, 45.0, 0.0]),
            ],
        }
    }

    /// Create every described part through the factory, depth first, in
    /// document order.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();
        let ws = scene.workspace();
        let mut stack: Vec<(NodeId, &PartDescription)> =
            self.parts.iter().rev().map(|p| (ws, p)).collect();
        while let Some((parent, desc)) = stack.pop() {
            let id = scene.create_instance("Part", desc.properties.clone(), Some(parent))?;
            stack.extend(desc.children.iter().rev().map(|c| (id, c)));
        }
        Ok(scene)
    }
}
