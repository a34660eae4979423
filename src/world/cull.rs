//! Name-based block shape heuristics used for culling and occlusion.

use crate::types::BlockState;

/// How a block hides its neighbours' faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CullType {
    /// Air or partial blocks: hide nothing.
    NonSolid,
    /// Full opaque cubes: hide every adjacent face.
    Opaque,
    /// See-through cubes that only hide faces of the same group (glass, ice).
    Transparent(String),
}

impl CullType {
    pub fn classify(block: &BlockState) -> CullType {
        if block.is_air() {
            return CullType::NonSolid;
        }

        let id = block.block_id();
        if let Some(group) = transparent_group(id) {
            return CullType::Transparent(group);
        }

        if is_likely_full_cube(id) {
            CullType::Opaque
        } else {
            CullType::NonSolid
        }
    }

    /// Whether a face of a block classified as `self` is hidden by `neighbor`.
    pub fn is_hidden_by(&self, neighbor: &CullType) -> bool {
        match (self, neighbor) {
            (_, CullType::Opaque) => true,
            (CullType::Transparent(current), CullType::Transparent(other)) => current == other,
            _ => false,
        }
    }
}

fn transparent_group(id: &str) -> Option<String> {
    if id == "glass" || id.ends_with("_glass") {
        let group = if id.contains("stained") {
            "stained_glass"
        } else if id == "tinted_glass" {
            "tinted_glass"
        } else {
            "glass"
        };
        return Some(group.to_string());
    }

    if id == "glass_pane" || id.ends_with("_glass_pane") {
        let group = if id.contains("stained") { "stained_glass_pane" } else { "glass_pane" };
        return Some(group.to_string());
    }

    if matches!(
        id,
        "ice" | "packed_ice" | "blue_ice" | "frosted_ice" | "slime_block" | "honey_block"
    ) {
        return Some(id.to_string());
    }

    if id.ends_with("_leaves") {
        return Some("leaves".to_string());
    }

    None
}

/// Guess from the block id whether the block fills its whole cell.
pub fn is_likely_full_cube(id: &str) -> bool {
    if id.contains("air") {
        return false;
    }

    const NON_FULL_PATTERNS: &[&str] = &[
        "slab", "stairs", "fence", "wall", "door", "trapdoor", "sign", "banner", "button",
        "lever", "torch", "lantern", "pressure_plate", "carpet", "rail", "flower", "sapling",
        "glass_pane", "iron_bars", "chain", "rod", "candle", "head", "skull", "pot",
        "campfire", "anvil", "bell", "brewing_stand", "cauldron", "hopper", "lectern",
        "grindstone", "stonecutter", "enchanting_table", "repeater", "comparator",
        "daylight_detector", "piston", "tripwire", "string", "cobweb", "vine", "ladder",
        "scaffolding", "coral_fan", "pickle", "egg", "dripleaf", "azalea", "roots",
        "sprouts", "fungus", "mushroom", "grass", "fern", "bush", "berry", "wart", "stem",
        "crop", "wheat", "carrots", "potatoes", "beetroots", "cocoa", "cactus", "sugar_cane",
        "bamboo", "kelp", "seagrass", "lichen", "vein", "fire", "snow", "layer", "poppy",
        "dandelion", "orchid", "allium", "tulip", "oxeye_daisy", "cornflower",
        "lily_of_the_valley", "wither_rose", "sunflower", "lilac", "rose_bush", "peony",
    ];

    for pattern in NON_FULL_PATTERNS {
        if id.contains(pattern) {
            // mushroom_block, grass_block and friends are still cubes.
            if id.ends_with("_block") && !id.contains("piston") {
                continue;
            }
            return false;
        }
    }

    true
}
