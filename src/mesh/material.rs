//! Per-quad material flags and render layers.

use crate::types::BlockState;
use serde::{Deserialize, Serialize};

/// Draw batch a vertex is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderLayer {
    Solid,
    Cutout,
    CutoutMipped,
    Translucent,
}

impl RenderLayer {
    /// Default layer for a block, by name.
    pub fn for_block(block: &BlockState) -> RenderLayer {
        let id = block.block_id();

        if id == "glass"
            || id.ends_with("_stained_glass")
            || id == "tinted_glass"
            || id.ends_with("_stained_glass_pane")
            || matches!(id, "ice" | "slime_block" | "honey_block" | "water" | "nether_portal")
        {
            return RenderLayer::Translucent;
        }

        if id.ends_with("_leaves") {
            return RenderLayer::CutoutMipped;
        }

        const CUTOUT_PATTERNS: &[&str] = &[
            "glass_pane", "iron_bars", "torch", "sapling", "flower", "tulip", "rail",
            "ladder", "vine", "door", "grass", "fern", "mushroom", "crop", "wheat",
            "carrots", "potatoes", "beetroots", "cobweb", "lantern", "chain", "scaffolding",
        ];
        if CUTOUT_PATTERNS.iter().any(|p| id.contains(p)) && !id.ends_with("_block") {
            return RenderLayer::Cutout;
        }

        RenderLayer::Solid
    }
}

/// How a quad picks its render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Use the block's default layer.
    #[default]
    Default,
    Solid,
    Cutout,
    CutoutMipped,
    Translucent,
}

impl BlendMode {
    /// Resolve to a concrete layer, falling back to the block default.
    pub fn layer_or(self, block_default: RenderLayer) -> RenderLayer {
        match self {
            BlendMode::Default => block_default,
            BlendMode::Solid => RenderLayer::Solid,
            BlendMode::Cutout => RenderLayer::Cutout,
            BlendMode::CutoutMipped => RenderLayer::CutoutMipped,
            BlendMode::Translucent => RenderLayer::Translucent,
        }
    }
}

/// A boolean that may defer to a surrounding default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Default,
    True,
    False,
}

impl TriState {
    pub fn resolve(self, default: bool) -> bool {
        match self {
            TriState::Default => default,
            TriState::True => true,
            TriState::False => false,
        }
    }
}

/// Lighting and layering flags attached to a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadMaterial {
    pub blend_mode: BlendMode,
    /// Smooth lighting; `Default` follows the block's AO enablement.
    pub ambient_occlusion: TriState,
    /// Apply per-face directional shade.
    pub diffuse_shading: bool,
    /// Render at full brightness regardless of world light.
    pub emissive: bool,
}

impl Default for QuadMaterial {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Default,
            ambient_occlusion: TriState::Default,
            diffuse_shading: true,
            emissive: false,
        }
    }
}

impl QuadMaterial {
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn with_ambient_occlusion(mut self, ambient_occlusion: TriState) -> Self {
        self.ambient_occlusion = ambient_occlusion;
        self
    }

    pub fn with_diffuse_shading(mut self, diffuse_shading: bool) -> Self {
        self.diffuse_shading = diffuse_shading;
        self
    }

    pub fn with_emissive(mut self, emissive: bool) -> Self {
        self.emissive = emissive;
        self
    }
}
