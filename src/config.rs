//! Render configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global switches for a [`BlockRenderContext`](crate::BlockRenderContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Smooth lighting; models and blocks can still opt out.
    pub ambient_occlusion: bool,
    /// Directional per-face shade.
    pub diffuse_shading: bool,
    /// Drop quads whose cull face is hidden by the neighbouring block.
    pub cull_hidden_faces: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ambient_occlusion: true,
            diffuse_shading: true,
            cull_hidden_faces: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn with_ambient_occlusion(mut self, enabled: bool) -> Self {
        self.ambient_occlusion = enabled;
        self
    }

    pub fn with_diffuse_shading(mut self, enabled: bool) -> Self {
        self.diffuse_shading = enabled;
        self
    }

    pub fn with_cull_hidden_faces(mut self, enabled: bool) -> Self {
        self.cull_hidden_faces = enabled;
        self
    }
}
