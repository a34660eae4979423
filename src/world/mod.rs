//! World access for the renderer.
//!
//! [`WorldView`] is the read-only surface a render call samples for light,
//! occlusion and face visibility. [`StaticWorld`] is a small in-memory
//! implementation with flood-filled lighting and name-based culling.

mod cull;
mod light;

pub use cull::{is_likely_full_cube, CullType};
pub use light::{block_opacity, emission_level, LightMap, LightingConfig};

use crate::types::light::MAX_LIGHT_COORDS;
use crate::types::{BlockPosition, BlockState, Direction};
use std::collections::HashMap;

/// Occlusion level of a full opaque cube.
pub const OPAQUE_AO_LEVEL: f32 = 0.2;

/// Read-only view of the blocks around a rendered block.
pub trait WorldView {
    /// Block at `pos`, `None` for empty space.
    fn block_state(&self, pos: BlockPosition) -> Option<&BlockState>;

    /// Packed light coordinate at `pos`, occupied by `block`.
    fn light_coords(&self, pos: BlockPosition, block: &BlockState) -> u32;

    /// How much light `block` at `pos` lets through to neighbouring corners, 0.0-1.0.
    fn ao_level(&self, pos: BlockPosition, block: &BlockState) -> f32;

    /// Whether the `side` face of `block` at `pos` is visible.
    fn should_draw_side(&self, _block: &BlockState, _pos: BlockPosition, _side: Direction) -> bool {
        true
    }

    /// Directional shade for a face.
    fn diffuse_shade(&self, face: Direction, shaded: bool) -> f32 {
        if shaded {
            face.diffuse_shade()
        } else {
            1.0
        }
    }
}

/// In-memory world of explicitly placed blocks.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    blocks: HashMap<BlockPosition, BlockState>,
    light_map: Option<LightMap>,
    light_overrides: HashMap<BlockPosition, u32>,
    ao_overrides: HashMap<BlockPosition, f32>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a world from `(position, block)` pairs. Air entries are skipped.
    pub fn from_blocks(blocks: impl IntoIterator<Item = (BlockPosition, BlockState)>) -> Self {
        let mut world = Self::new();
        for (pos, block) in blocks {
            world.set_block(pos, block);
        }
        world
    }

    /// Place a block. Previously computed lighting is discarded.
    pub fn set_block(&mut self, pos: BlockPosition, block: BlockState) {
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
        self.light_map = None;
    }

    /// Flood-fill block and sky light. Without this every position is fully lit.
    pub fn compute_lighting(&mut self, config: &LightingConfig) {
        self.light_map = Some(LightMap::compute(&self.blocks, config));
    }

    pub fn with_lighting(mut self, config: &LightingConfig) -> Self {
        self.compute_lighting(config);
        self
    }

    /// Pin the light coordinate reported for `pos`.
    pub fn set_light(&mut self, pos: BlockPosition, light: u32) {
        self.light_overrides.insert(pos, light);
    }

    /// Pin the occlusion level reported for `pos`.
    pub fn set_ao_level(&mut self, pos: BlockPosition, level: f32) {
        self.ao_overrides.insert(pos, level.clamp(0.0, 1.0));
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl WorldView for StaticWorld {
    fn block_state(&self, pos: BlockPosition) -> Option<&BlockState> {
        self.blocks.get(&pos)
    }

    fn light_coords(&self, pos: BlockPosition, _block: &BlockState) -> u32 {
        if let Some(&light) = self.light_overrides.get(&pos) {
            return light;
        }
        match &self.light_map {
            Some(map) => map.light_coords(pos),
            None => MAX_LIGHT_COORDS,
        }
    }

    fn ao_level(&self, pos: BlockPosition, block: &BlockState) -> f32 {
        if let Some(&level) = self.ao_overrides.get(&pos) {
            return level;
        }
        if CullType::classify(block) == CullType::Opaque {
            OPAQUE_AO_LEVEL
        } else {
            1.0
        }
    }

    fn should_draw_side(&self, block: &BlockState, pos: BlockPosition, side: Direction) -> bool {
        match self.blocks.get(&pos.neighbor(side)) {
            Some(neighbor) => {
                !CullType::classify(block).is_hidden_by(&CullType::classify(neighbor))
            }
            None => true,
        }
    }
}
