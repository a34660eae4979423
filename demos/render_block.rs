//! Render a grass block sitting in a small patch of stone and print it as OBJ.
//!
//! Usage: cargo run --example render_block [output.obj]

use block_renderer::{
    export_layers_obj, BlockPosition, BlockRenderContext, BlockState, BlockTransform, Direction,
    GeometryProvider, JsonModel, LayeredBuffers, LightingConfig, MatrixStack, StaticWorld,
    WorldView,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const GRASS_BLOCK: &str = r##"{
    "ambientocclusion": true,
    "textures": { "top": "block/grass_block_top", "side": "block/grass_block_side" },
    "elements": [
        {
            "from": [0, 0, 0],
            "to": [16, 16, 16],
            "faces": {
                "down":  { "texture": "#side", "cullface": "down" },
                "up":    { "texture": "#top", "cullface": "up", "tintindex": 0 },
                "north": { "texture": "#side", "cullface": "north" },
                "south": { "texture": "#side", "cullface": "south" },
                "west":  { "texture": "#side", "cullface": "west" },
                "east":  { "texture": "#side", "cullface": "east" }
            }
        }
    ]
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let origin = BlockPosition::new(0, 0, 0);
    let stone = BlockState::new("minecraft:stone");
    let grass = BlockState::new("minecraft:grass_block").with_property("snowy", "false");

    // Stone floor under the block and a wall to the north, so the bottom face
    // is culled and the top face picks up occlusion along one edge.
    let mut blocks = Vec::new();
    for x in -1..=1 {
        for z in -1..=1 {
            blocks.push((BlockPosition::new(x, -1, z), stone.clone()));
        }
        blocks.push((BlockPosition::new(x, 1, -1), stone.clone()));
    }
    blocks.push((origin, grass.clone()));
    let world = StaticWorld::from_blocks(blocks).with_lighting(&LightingConfig::default());

    let model = JsonModel::from_json(GRASS_BLOCK)?.bake(BlockTransform::default())?;

    let mut context = BlockRenderContext::new();
    let mut buffers = LayeredBuffers::new();
    let mut rng = StdRng::seed_from_u64(0);
    let drew = context.render(
        Some(&world),
        GeometryProvider::Legacy(&model),
        &grass,
        origin,
        &MatrixStack::new(),
        &mut buffers,
        &mut rng,
        42,
        0,
    );

    log::info!(
        "Rendered {}: output={} vertices={} (bottom visible: {})",
        grass.name,
        drew,
        buffers.total_vertices(),
        world.should_draw_side(&grass, origin, Direction::Down)
    );

    let obj = export_layers_obj(&buffers, "grass_block")?;
    match std::env::args().nth(1) {
        Some(path) => std::fs::write(path, obj)?,
        None => print!("{}", obj),
    }
    Ok(())
}
