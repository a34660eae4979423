//! Block light and sky light flood fill for [`StaticWorld`](super::StaticWorld).

use crate::types::light::pack_light;
use crate::types::{BlockPosition, BlockState, Direction};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Configuration for light propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Enable block light (torches, glowstone, etc.).
    pub enable_block_light: bool,
    /// Enable sky light (sunlight from above).
    pub enable_sky_light: bool,
    /// Sky light level (0-15, default 15 for daytime).
    pub sky_light_level: u8,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            enable_block_light: true,
            enable_sky_light: true,
            sky_light_level: 15,
        }
    }
}

impl LightingConfig {
    pub fn is_enabled(&self) -> bool {
        self.enable_block_light || self.enable_sky_light
    }

    /// Sky level seen outside the computed region.
    fn open_sky(&self) -> u8 {
        if self.enable_sky_light {
            self.sky_light_level.min(15)
        } else {
            0
        }
    }
}

fn is_lit(block: &BlockState) -> bool {
    block.property("lit") == Some("true")
}

/// Get the light emission level of a block (0-15).
pub fn emission_level(block: &BlockState) -> u8 {
    match block.block_id() {
        "beacon" | "conduit" | "end_gateway" | "end_portal" | "fire" | "glowstone"
        | "jack_o_lantern" | "lava" | "lantern" | "sea_lantern" | "shroomlight" => 15,

        "campfire" | "redstone_lamp" if is_lit(block) => 15,
        "furnace" | "blast_furnace" | "smoker" if is_lit(block) => 13,
        "torch" | "wall_torch" => 14,
        "end_rod" | "crying_obsidian" => 12,
        "nether_portal" => 11,
        "soul_campfire" if is_lit(block) => 10,
        "soul_fire" | "soul_torch" | "soul_wall_torch" | "soul_lantern" => 10,
        "enchanting_table" | "ender_chest" | "glow_lichen" | "sculk_sensor" => 7,
        "redstone_torch" | "redstone_wall_torch" if block.property("lit") != Some("false") => 7,
        "magma_block" => 3,
        "brewing_stand" | "brown_mushroom" => 1,

        id if id == "candle" || id.ends_with("_candle") => {
            if is_lit(block) {
                let count: u8 = block.property("candles").and_then(|v| v.parse().ok()).unwrap_or(1);
                (3 * count.min(5)).min(15)
            } else {
                0
            }
        }

        _ => 0,
    }
}

/// Get the light opacity of a block.
/// 0 = fully transparent to light, 15 = fully blocks light.
pub fn block_opacity(block: &BlockState) -> u8 {
    if block.is_air() {
        return 0;
    }

    let id = block.block_id();
    match id {
        "glass" | "glass_pane" | "barrier" | "light" | "structure_void" => 0,
        _ if id.ends_with("_glass") || id.ends_with("_glass_pane") => 0,

        "water" | "ice" | "cobweb" => 1,
        "frosted_ice" => 2,
        _ if id.ends_with("_leaves") => 1,

        _ if id.ends_with("_slab") => match block.property("type") {
            Some("double") => 15,
            _ => 0,
        },

        _ if super::cull::is_likely_full_cube(id) => 15,
        _ => 0,
    }
}

/// Computed light levels for a finite region.
#[derive(Debug, Clone)]
pub struct LightMap {
    block_light: Vec<u8>,
    sky_light: Vec<u8>,
    grid_min: [i32; 3],
    grid_size: [usize; 3],
    open_sky: u8,
}

impl LightMap {
    /// Compute lighting for a set of blocks, padded by one block on every side.
    pub fn compute(blocks: &HashMap<BlockPosition, BlockState>, config: &LightingConfig) -> Self {
        if blocks.is_empty() || !config.is_enabled() {
            return Self {
                block_light: Vec::new(),
                sky_light: Vec::new(),
                grid_min: [0; 3],
                grid_size: [0; 3],
                open_sky: config.open_sky(),
            };
        }

        let mut min = [i32::MAX; 3];
        let mut max = [i32::MIN; 3];
        for pos in blocks.keys() {
            for (axis, c) in [pos.x, pos.y, pos.z].into_iter().enumerate() {
                min[axis] = min[axis].min(c - 1);
                max[axis] = max[axis].max(c + 1);
            }
        }

        let grid_size = [
            (max[0] - min[0] + 1) as usize,
            (max[1] - min[1] + 1) as usize,
            (max[2] - min[2] + 1) as usize,
        ];
        let total = grid_size[0] * grid_size[1] * grid_size[2];
        let index = |pos: BlockPosition| grid_index(pos, min, grid_size);

        let mut opacity = vec![0u8; total];
        for (pos, block) in blocks {
            if let Some(idx) = index(*pos) {
                opacity[idx] = block_opacity(block);
            }
        }

        let mut block_light = vec![0u8; total];
        if config.enable_block_light {
            let mut queue = VecDeque::new();
            for (pos, block) in blocks {
                let emission = emission_level(block);
                if let (true, Some(idx)) = (emission > 0, index(*pos)) {
                    block_light[idx] = emission;
                    queue.push_back((*pos, emission));
                }
            }
            spread(&mut block_light, &opacity, queue, &index);
        }

        let mut sky_light = vec![0u8; total];
        if config.enable_sky_light {
            let mut queue = VecDeque::new();
            // Straight down each column until an opaque block.
            for x in min[0]..=max[0] {
                for z in min[2]..=max[2] {
                    let mut current = config.open_sky();
                    for y in (min[1]..=max[1]).rev() {
                        let pos = BlockPosition::new(x, y, z);
                        let Some(idx) = index(pos) else { continue };
                        if opacity[idx] >= 15 {
                            current = 0;
                            continue;
                        }
                        current = current.saturating_sub(opacity[idx]);
                        if current > 0 {
                            sky_light[idx] = current;
                            queue.push_back((pos, current));
                        }
                    }
                }
            }
            spread(&mut sky_light, &opacity, queue, &index);
        }

        Self {
            block_light,
            sky_light,
            grid_min: min,
            grid_size,
            open_sky: config.open_sky(),
        }
    }

    /// Block and sky level at a position. Outside the region only sky light applies.
    pub fn levels(&self, pos: BlockPosition) -> (u8, u8) {
        match grid_index(pos, self.grid_min, self.grid_size) {
            Some(idx) => (self.block_light[idx], self.sky_light[idx]),
            None => (0, self.open_sky),
        }
    }

    /// Packed light coordinate at a position.
    pub fn light_coords(&self, pos: BlockPosition) -> u32 {
        let (block, sky) = self.levels(pos);
        pack_light(block, sky)
    }
}

/// Breadth-first propagation; each step costs at least one level.
fn spread<F>(levels: &mut [u8], opacity: &[u8], mut queue: VecDeque<(BlockPosition, u8)>, index: &F)
where
    F: Fn(BlockPosition) -> Option<usize>,
{
    while let Some((pos, level)) = queue.pop_front() {
        for dir in Direction::ALL {
            let neighbor = pos.neighbor(dir);
            if let Some(idx) = index(neighbor) {
                let new_level = level.saturating_sub(opacity[idx].max(1));
                if new_level > levels[idx] {
                    levels[idx] = new_level;
                    queue.push_back((neighbor, new_level));
                }
            }
        }
    }
}

fn grid_index(pos: BlockPosition, grid_min: [i32; 3], grid_size: [usize; 3]) -> Option<usize> {
    let x = pos.x - grid_min[0];
    let y = pos.y - grid_min[1];
    let z = pos.z - grid_min[2];
    if x < 0 || y < 0 || z < 0 {
        return None;
    }
    let (x, y, z) = (x as usize, y as usize, z as usize);
    if x < grid_size[0] && y < grid_size[1] && z < grid_size[2] {
        Some(x + y * grid_size[0] + z * grid_size[0] * grid_size[1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(blocks: &[(BlockPosition, &str)]) -> HashMap<BlockPosition, BlockState> {
        blocks
            .iter()
            .map(|(pos, name)| (*pos, BlockState::new(*name)))
            .collect()
    }

    #[test]
    fn test_emission_levels() {
        assert_eq!(emission_level(&BlockState::new("minecraft:glowstone")), 15);
        assert_eq!(emission_level(&BlockState::new("minecraft:torch")), 14);
        assert_eq!(emission_level(&BlockState::new("minecraft:stone")), 0);
        assert_eq!(emission_level(&BlockState::new("minecraft:furnace")), 0);
        let lit = BlockState::new("minecraft:furnace").with_property("lit", "true");
        assert_eq!(emission_level(&lit), 13);
        let candles = BlockState::new("minecraft:red_candle")
            .with_property("lit", "true")
            .with_property("candles", "3");
        assert_eq!(emission_level(&candles), 9);
    }

    #[test]
    fn test_opacity() {
        assert_eq!(block_opacity(&BlockState::air()), 0);
        assert_eq!(block_opacity(&BlockState::new("minecraft:stone")), 15);
        assert_eq!(block_opacity(&BlockState::new("minecraft:glass")), 0);
        assert_eq!(block_opacity(&BlockState::new("minecraft:oak_leaves")), 1);
        assert_eq!(block_opacity(&BlockState::new("minecraft:torch")), 0);
        assert_eq!(block_opacity(&BlockState::new("minecraft:stone_slab")), 0);
    }

    #[test]
    fn test_block_light_falls_off_by_distance() {
        let config = LightingConfig {
            enable_sky_light: false,
            ..Default::default()
        };
        let glowing = world(&[(BlockPosition::new(0, 0, 0), "minecraft:glowstone")]);
        let map = LightMap::compute(&glowing, &config);
        assert_eq!(map.levels(BlockPosition::new(0, 0, 0)), (15, 0));
        assert_eq!(map.levels(BlockPosition::new(1, 0, 0)), (14, 0));
        assert_eq!(map.light_coords(BlockPosition::new(0, 1, 0)), pack_light(14, 0));
    }

    #[test]
    fn test_sky_light_is_blocked_by_roof() {
        let map = LightMap::compute(
            &world(&[
                (BlockPosition::new(0, 2, 0), "minecraft:stone"),
                (BlockPosition::new(0, 0, 0), "minecraft:stone"),
            ]),
            &LightingConfig::default(),
        );
        assert_eq!(map.levels(BlockPosition::new(0, 3, 0)).1, 15);
        assert_eq!(map.levels(BlockPosition::new(0, 2, 0)).1, 0);
        // Under the roof, light only arrives sideways from the padded edge.
        assert_eq!(map.levels(BlockPosition::new(0, 1, 0)).1, 14);
        assert_eq!(map.levels(BlockPosition::new(0, 50, 0)).1, 15);
    }
}
