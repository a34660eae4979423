//! Block colours applied to tinted quads.
//!
//! Quads with a non-negative tint index are multiplied by a colour that
//! depends on the block (grass, foliage, water, redstone power, stem age).

use crate::types::{BlockPosition, BlockState};
use crate::world::WorldView;
use serde::{Deserialize, Serialize};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Source of per-block tint colours.
pub trait BlockColors {
    /// Colour multiplier for `tint_index` on `block`, white when untinted.
    fn color(
        &self,
        block: &BlockState,
        world: Option<&dyn WorldView>,
        pos: BlockPosition,
        tint_index: i32,
    ) -> [f32; 4];
}

/// Biome-dependent base colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TintColors {
    pub grass: [f32; 4],
    pub foliage: [f32; 4],
    pub water: [f32; 4],
    pub lily_pad: [f32; 4],
}

impl Default for TintColors {
    fn default() -> Self {
        // Plains.
        Self {
            grass: [0.56, 0.74, 0.35, 1.0],
            foliage: [0.47, 0.66, 0.23, 1.0],
            water: [0.247, 0.463, 0.894, 1.0],
            lily_pad: [0.13, 0.55, 0.13, 1.0],
        }
    }
}

impl TintColors {
    /// Colours for a named biome; unknown biomes get plains colours.
    pub fn for_biome(biome: &str) -> Self {
        let mut colors = Self::default();
        let name = biome.strip_prefix("minecraft:").unwrap_or(biome);
        match name {
            "swamp" | "mangrove_swamp" => {
                colors.grass = [0.41, 0.55, 0.27, 1.0];
                colors.foliage = [0.41, 0.55, 0.27, 1.0];
                colors.water = [0.38, 0.48, 0.27, 1.0];
            }
            "badlands" | "wooded_badlands" | "eroded_badlands" => {
                colors.grass = [0.56, 0.50, 0.30, 1.0];
                colors.foliage = [0.62, 0.56, 0.35, 1.0];
            }
            "jungle" | "bamboo_jungle" | "sparse_jungle" => {
                colors.grass = [0.35, 0.75, 0.15, 1.0];
                colors.foliage = [0.30, 0.72, 0.20, 1.0];
            }
            "snowy_plains" | "snowy_taiga" | "snowy_slopes" => {
                colors.grass = [0.50, 0.70, 0.50, 1.0];
                colors.foliage = [0.39, 0.61, 0.39, 1.0];
            }
            "desert" => {
                colors.grass = [0.75, 0.72, 0.45, 1.0];
                colors.foliage = [0.68, 0.68, 0.40, 1.0];
            }
            _ => {}
        }
        colors
    }
}

/// Name-based [`BlockColors`] implementation.
#[derive(Debug, Clone, Default)]
pub struct TintProvider {
    colors: TintColors,
}

impl TintProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(colors: TintColors) -> Self {
        Self { colors }
    }

    pub fn for_biome(biome: &str) -> Self {
        Self::with_colors(TintColors::for_biome(biome))
    }

    pub fn colors(&self) -> &TintColors {
        &self.colors
    }

    /// Tint for a block regardless of position.
    pub fn tint(&self, block: &BlockState, tint_index: i32) -> [f32; 4] {
        if tint_index < 0 {
            return WHITE;
        }

        let id = block.block_id();
        match id {
            "grass_block" | "grass" | "short_grass" | "tall_grass" | "fern" | "large_fern"
            | "potted_fern" | "sugar_cane" => self.colors.grass,
            "vine" => self.colors.foliage,
            _ if id.ends_with("_leaves") && !id.starts_with("azalea") => self.colors.foliage,
            "water" | "bubble_column" | "water_cauldron" => self.colors.water,
            "lily_pad" => self.colors.lily_pad,
            "redstone_wire" => redstone_color(numeric_property(block, "power", 15)),
            "attached_melon_stem" | "attached_pumpkin_stem" => stem_color(7),
            "melon_stem" | "pumpkin_stem" => stem_color(numeric_property(block, "age", 7)),
            _ => WHITE,
        }
    }
}

impl BlockColors for TintProvider {
    fn color(
        &self,
        block: &BlockState,
        _world: Option<&dyn WorldView>,
        _pos: BlockPosition,
        tint_index: i32,
    ) -> [f32; 4] {
        self.tint(block, tint_index)
    }
}

fn numeric_property(block: &BlockState, key: &str, max: u8) -> u8 {
    block
        .property(key)
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0)
        .min(max)
}

/// Dim red at power 0, bright red at 15.
fn redstone_color(power: u8) -> [f32; 4] {
    let t = power as f32 / 15.0;
    [0.3 + t * 0.7, t * 0.1, t * 0.1, 1.0]
}

/// Green when young, yellow-orange when grown.
fn stem_color(age: u8) -> [f32; 4] {
    let t = age as f32 / 7.0;
    [0.2 + t * 0.6, 0.7 - t * 0.2, 0.1, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untinted_quads_stay_white() {
        let provider = TintProvider::new();
        assert_eq!(provider.tint(&BlockState::new("minecraft:grass_block"), -1), WHITE);
        assert_eq!(provider.tint(&BlockState::new("minecraft:stone"), 0), WHITE);
    }

    #[test]
    fn test_grass_is_green() {
        let provider = TintProvider::new();
        let grass = BlockState::new("minecraft:grass_block");
        let tint = provider.color(&grass, None, BlockPosition::default(), 0);
        assert!(tint[0] < 1.0);
        assert!(tint[1] > tint[0]);
    }

    #[test]
    fn test_state_dependent_tints() {
        let provider = TintProvider::new();
        let wire = |power: &str| {
            BlockState::new("minecraft:redstone_wire").with_property("power", power)
        };
        assert!(provider.tint(&wire("15"), 0)[0] > provider.tint(&wire("0"), 0)[0]);

        let stem = |age: &str| BlockState::new("minecraft:melon_stem").with_property("age", age);
        assert!(provider.tint(&stem("7"), 0)[0] > provider.tint(&stem("0"), 0)[0]);
    }

    #[test]
    fn test_biome_tints() {
        let plains = TintProvider::new();
        let swamp = TintProvider::for_biome("minecraft:swamp");
        let jungle = TintProvider::for_biome("jungle");
        assert_ne!(plains.colors().grass, swamp.colors().grass);
        assert!(jungle.colors().foliage[1] > plains.colors().foliage[1]);
    }
}
