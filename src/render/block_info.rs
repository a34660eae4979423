//! Per-call block state shared by the quad consumers.

use crate::config::RenderConfig;
use crate::mesh::{QuadMaterial, RenderLayer};
use crate::tint::BlockColors;
use crate::types::{BlockPosition, BlockState, Direction};
use crate::world::{emission_level, WorldView};
use std::cell::Cell;

/// The block being rendered and the world it is rendered in.
///
/// Built at the start of a render call and released at its end; the borrows
/// it holds never outlive the call.
pub struct BlockRenderInfo<'a> {
    world: Option<&'a dyn WorldView>,
    colors: &'a dyn BlockColors,
    block: &'a BlockState,
    pos: BlockPosition,
    /// Global smooth-lighting switch.
    use_ao: bool,
    /// The block's own AO default: model flag and no light emission.
    ao_enabled: bool,
    diffuse_shading: bool,
    cull_hidden_faces: bool,
    default_layer: RenderLayer,
    /// Bit per face: visibility already asked of the world.
    cull_checked: Cell<u8>,
    /// Bit per face: face is visible.
    cull_result: Cell<u8>,
}

impl<'a> BlockRenderInfo<'a> {
    pub fn prepare_for_block(
        world: Option<&'a dyn WorldView>,
        colors: &'a dyn BlockColors,
        config: &RenderConfig,
        block: &'a BlockState,
        pos: BlockPosition,
        model_ao: bool,
    ) -> Self {
        Self {
            world,
            colors,
            block,
            pos,
            use_ao: config.ambient_occlusion,
            ao_enabled: model_ao && emission_level(block) == 0,
            diffuse_shading: config.diffuse_shading,
            cull_hidden_faces: config.cull_hidden_faces,
            default_layer: RenderLayer::for_block(block),
            cull_checked: Cell::new(0),
            cull_result: Cell::new(0),
        }
    }

    /// End of the render call; drops every borrow.
    pub fn release(self) {}

    pub fn world(&self) -> Option<&'a dyn WorldView> {
        self.world
    }

    pub fn block(&self) -> &'a BlockState {
        self.block
    }

    pub fn pos(&self) -> BlockPosition {
        self.pos
    }

    /// Whether this block defaults to smooth lighting.
    pub fn ao_enabled(&self) -> bool {
        self.ao_enabled
    }

    /// Smooth lighting for a quad: globally on, and the material or block default asks for it.
    pub fn smooth_lighting(&self, material: &QuadMaterial) -> bool {
        self.use_ao && material.ambient_occlusion.resolve(self.ao_enabled)
    }

    pub fn default_layer(&self) -> RenderLayer {
        self.default_layer
    }

    /// Whether quads culled against `cull_face` are visible. Answers are cached per face.
    pub fn should_draw_face(&self, cull_face: Option<Direction>) -> bool {
        let Some(face) = cull_face else {
            return true;
        };
        let Some(world) = self.world else {
            return true;
        };
        if !self.cull_hidden_faces {
            return true;
        }

        let mask = 1u8 << face.index();
        if self.cull_checked.get() & mask == 0 {
            if world.should_draw_side(self.block, self.pos, face) {
                self.cull_result.set(self.cull_result.get() | mask);
            }
            self.cull_checked.set(self.cull_checked.get() | mask);
        }
        self.cull_result.get() & mask != 0
    }

    /// Tint multiplier, white for untinted quads.
    pub fn block_color(&self, tint_index: i32) -> [f32; 4] {
        if tint_index < 0 {
            return [1.0; 4];
        }
        self.colors.color(self.block, self.world, self.pos, tint_index)
    }

    /// Directional shade for a face, 1.0 when shading is off.
    pub fn diffuse_shade(&self, face: Direction, shaded: bool) -> f32 {
        if !self.diffuse_shading || !shaded {
            return 1.0;
        }
        match self.world {
            Some(world) => world.diffuse_shade(face, true),
            None => face.diffuse_shade(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TriState;
    use crate::tint::TintProvider;
    use crate::world::StaticWorld;

    struct CountingWorld {
        inner: StaticWorld,
        queries: Cell<usize>,
    }

    impl WorldView for CountingWorld {
        fn block_state(&self, pos: BlockPosition) -> Option<&BlockState> {
            self.inner.block_state(pos)
        }

        fn light_coords(&self, pos: BlockPosition, block: &BlockState) -> u32 {
            self.inner.light_coords(pos, block)
        }

        fn ao_level(&self, pos: BlockPosition, block: &BlockState) -> f32 {
            self.inner.ao_level(pos, block)
        }

        fn should_draw_side(
            &self,
            block: &BlockState,
            pos: BlockPosition,
            side: Direction,
        ) -> bool {
            self.queries.set(self.queries.get() + 1);
            self.inner.should_draw_side(block, pos, side)
        }
    }

    #[test]
    fn test_face_visibility_is_cached() {
        let origin = BlockPosition::default();
        let stone = BlockState::new("minecraft:stone");
        let world = CountingWorld {
            inner: StaticWorld::from_blocks([(origin.neighbor(Direction::Up), stone.clone())]),
            queries: Cell::new(0),
        };
        let colors = TintProvider::new();
        let view: &dyn WorldView = &world;
        let config = RenderConfig::default();
        let info =
            BlockRenderInfo::prepare_for_block(Some(view), &colors, &config, &stone, origin, true);

        assert!(!info.should_draw_face(Some(Direction::Up)));
        assert!(!info.should_draw_face(Some(Direction::Up)));
        assert!(info.should_draw_face(Some(Direction::Down)));
        assert!(info.should_draw_face(None));
        assert_eq!(world.queries.get(), 2);
    }

    #[test]
    fn test_no_world_draws_everything() {
        let stone = BlockState::new("minecraft:stone");
        let colors = TintProvider::new();
        let config = RenderConfig::default();
        let origin = BlockPosition::default();
        let info = BlockRenderInfo::prepare_for_block(None, &colors, &config, &stone, origin, true);
        for face in Direction::ALL {
            assert!(info.should_draw_face(Some(face)));
        }
        assert_eq!(info.diffuse_shade(Direction::Down, true), 0.5);
        assert_eq!(info.diffuse_shade(Direction::Down, false), 1.0);
        assert_eq!(info.block_color(-1), [1.0; 4]);
    }

    #[test]
    fn test_ao_enablement() {
        let colors = TintProvider::new();
        let config = RenderConfig::default();
        let pos = BlockPosition::default();
        let default_material = QuadMaterial::default();

        let stone = BlockState::new("minecraft:stone");
        let info = BlockRenderInfo::prepare_for_block(None, &colors, &config, &stone, pos, true);
        assert!(info.ao_enabled());
        assert!(info.smooth_lighting(&default_material));

        let glowstone = BlockState::new("minecraft:glowstone");
        let info =
            BlockRenderInfo::prepare_for_block(None, &colors, &config, &glowstone, pos, true);
        assert!(!info.ao_enabled());
        assert!(info.smooth_lighting(&default_material.with_ambient_occlusion(TriState::True)));

        let off = config.clone().with_ambient_occlusion(false);
        let info = BlockRenderInfo::prepare_for_block(None, &colors, &off, &stone, pos, true);
        assert!(!info.smooth_lighting(&default_material.with_ambient_occlusion(TriState::True)));
    }
}
