//! Single-block render entry point.

use super::ao::{AoCalculator, BrightnessSource, OcclusionSource};
use super::block_info::BlockRenderInfo;
use super::matrix::MatrixStack;
use super::output::BufferSource;
use super::random::RandomSupplier;
use super::sink::{FrameState, QuadSink};
use crate::config::RenderConfig;
use crate::model::GeometryProvider;
use crate::tint::{BlockColors, TintProvider};
use crate::types::{BlockPosition, BlockState};
use crate::world::WorldView;
use log::{debug, trace};
use rand::rngs::StdRng;

/// Renders one block at a time into caller-owned vertex buffers.
///
/// The context owns its lighting calculator and reuses it across calls.
/// `render` takes `&mut self`, so one context can only serve one call at a
/// time; render in parallel with one context per thread.
pub struct BlockRenderContext {
    config: RenderConfig,
    lighting: AoCalculator,
    colors: Box<dyn BlockColors>,
}

impl BlockRenderContext {
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
            lighting: AoCalculator::default(),
            colors: Box::new(TintProvider::new()),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the brightness and occlusion sources used for smooth lighting.
    pub fn with_light_sources(
        mut self,
        brightness: Box<dyn BrightnessSource>,
        occlusion: Box<dyn OcclusionSource>,
    ) -> Self {
        self.lighting = AoCalculator::new(brightness, occlusion);
        self
    }

    pub fn with_block_colors(mut self, colors: Box<dyn BlockColors>) -> Self {
        self.colors = colors;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `block` at `pos` from `model` into `buffers`.
    ///
    /// `world` may be `None` (item previews and the like); lighting then
    /// falls back to full brightness with no occlusion. The transform is the
    /// top of `matrices` as of this call and `overlay` is written to every
    /// vertex. The provider's random stream is `rng` reseeded with `seed`.
    ///
    /// Returns true iff at least one vertex was written.
    ///
    /// # Panics
    ///
    /// Panics if the provider emits a quad with non-finite coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        world: Option<&dyn WorldView>,
        model: GeometryProvider<'_>,
        block: &BlockState,
        pos: BlockPosition,
        matrices: &MatrixStack,
        buffers: &mut dyn BufferSource,
        rng: &mut StdRng,
        seed: u64,
        overlay: u32,
    ) -> bool {
        trace!("Rendering {} at {:?}", block.name, pos);

        let frame = FrameState {
            transform: *matrices.peek(),
            overlay,
        };
        let mut random = RandomSupplier::new(rng, seed);
        self.lighting.clear();

        let info = BlockRenderInfo::prepare_for_block(
            world,
            self.colors.as_ref(),
            &self.config,
            block,
            pos,
            model.use_ambient_occlusion(),
        );

        let did_output = {
            let mut sink = QuadSink::new(&info, &mut self.lighting, frame, buffers);
            match model {
                GeometryProvider::Native(model) => {
                    model.emit_block_quads(world, block, pos, &mut random, &mut sink)
                }
                GeometryProvider::Legacy(model) => sink.accept_legacy(model, &mut random),
            }
            sink.did_output()
        };

        info.release();

        if !did_output {
            debug!("{} at {:?} produced no geometry", block.name, pos);
        }
        did_output
    }
}

impl Default for BlockRenderContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{BlendMode, Mesh, Quad, QuadMaterial, RenderLayer, TriState};
    use crate::model::{
        BakedModel, BlockModel, JsonModel, MeshModel, SimpleBakedModel, WeightedModel,
    };
    use crate::render::{LayeredBuffers, VertexOut};
    use crate::types::light::{pack_light, MAX_LIGHT_COORDS};
    use crate::types::{Axis, BlockTransform, Direction, ElementRotation};
    use crate::world::StaticWorld;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;

    fn stone() -> BlockState {
        BlockState::new("minecraft:stone")
    }

    fn origin() -> BlockPosition {
        BlockPosition::default()
    }

    fn top_face() -> Mesh {
        Mesh::from_iter([Quad::square(Direction::Up, 0.0, 0.0, 1.0, 1.0, 0.0)])
    }

    fn cube() -> Mesh {
        Mesh::builder()
            .push_cuboid([0.0; 3], [1.0; 3], &Quad::new(Direction::Up))
            .build()
    }

    /// Render with default matrices and a fresh rng; returns the result flag and vertices.
    fn render_with(
        context: &mut BlockRenderContext,
        world: Option<&dyn WorldView>,
        model: GeometryProvider<'_>,
        overlay: u32,
    ) -> (bool, Vec<VertexOut>) {
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);
        let rendered = context.render(
            world,
            model,
            &stone(),
            origin(),
            &MatrixStack::new(),
            &mut out,
            &mut rng,
            7,
            overlay,
        );
        (rendered, out)
    }

    fn shade(vertex: &VertexOut) -> f32 {
        vertex.color[0]
    }

    /// Native provider that emits nothing.
    struct EmptyModel;

    impl BlockModel for EmptyModel {
        fn emit_block_quads(
            &self,
            _world: Option<&dyn WorldView>,
            _block: &BlockState,
            _pos: BlockPosition,
            _random: &mut RandomSupplier<'_>,
            _sink: &mut QuadSink<'_>,
        ) {
        }
    }

    /// A full-height panel turned 45 degrees about the block centre.
    fn rotated_panel() -> Quad {
        let rotation = ElementRotation {
            origin: [8.0, 8.0, 8.0],
            axis: Axis::Y,
            angle: 45.0,
            rescale: false,
        };
        let mut quad = Quad::square(Direction::North, 0.0, 0.0, 1.0, 1.0, 0.5);
        for vertex in &mut quad.vertices {
            vertex.position = rotation.apply(vertex.position);
            vertex.normal = rotation.apply_normal(vertex.normal);
        }
        quad
    }

    #[test]
    fn test_native_and_legacy_paths_match() {
        let mut world = StaticWorld::from_blocks([
            (BlockPosition::new(1, 0, 0), stone()),
            (BlockPosition::new(-1, 1, 0), stone()),
        ]);
        world.set_light(BlockPosition::new(0, 1, 0), pack_light(3, 12));
        world.set_ao_level(BlockPosition::new(1, 1, 1), 0.4);

        let tinted = Quad::square(Direction::North, 0.25, 0.0, 0.75, 0.5, 0.25)
            .with_color(0xFF80_4020)
            .with_tint_index(0);
        // Normals off the face axes only survive the fixed layout at byte precision.
        let tilted =
            Quad::square(Direction::Up, 0.0, 0.0, 1.0, 1.0, 0.5).with_normal([0.6, 0.8, 0.0]);
        let mesh = Mesh::builder()
            .push_cuboid([0.0; 3], [1.0, 0.75, 1.0], &Quad::new(Direction::Up))
            .push(tinted)
            .push(tilted)
            .push(rotated_panel())
            .build();
        let native = MeshModel::new(mesh);
        let legacy = native.to_baked();

        let mut matrices = MatrixStack::new();
        matrices.translate(2.0, -1.0, 0.5);
        matrices.rotate(glam::Quat::from_rotation_y(0.3));
        matrices.scale(1.0, 2.0, 1.0);

        let mut context = BlockRenderContext::new();
        let block = BlockState::new("minecraft:grass_block");
        let mut draw = |model: GeometryProvider<'_>| {
            let mut out = Vec::new();
            let mut rng = StdRng::seed_from_u64(1);
            let view: &dyn WorldView = &world;
            let rendered = context.render(
                Some(view),
                model,
                &block,
                origin(),
                &matrices,
                &mut out,
                &mut rng,
                3,
                5,
            );
            assert!(rendered);
            out
        };
        let from_native = draw(GeometryProvider::Native(&native));
        let from_legacy = draw(GeometryProvider::Legacy(&legacy));

        // East side is hidden by the neighbour.
        assert_eq!(from_native.len(), 8 * 4);
        assert_eq!(from_native.len(), from_legacy.len());
        let mut native_sorted = from_native.clone();
        let mut legacy_sorted = from_legacy.clone();
        let key = |v: &VertexOut| {
            (
                v.position.map(f32::to_bits),
                v.normal.map(f32::to_bits),
                v.uv.map(f32::to_bits),
            )
        };
        native_sorted.sort_by_key(key);
        legacy_sorted.sort_by_key(key);
        for (a, b) in native_sorted.iter().zip(legacy_sorted.iter()) {
            assert_eq!(a.position.map(f32::to_bits), b.position.map(f32::to_bits));
            assert_eq!(a.normal.map(f32::to_bits), b.normal.map(f32::to_bits));
            assert_eq!(a.color.map(f32::to_bits), b.color.map(f32::to_bits));
            assert_eq!(a.uv.map(f32::to_bits), b.uv.map(f32::to_bits));
            assert_eq!(a.light, b.light);
            assert_eq!(a.overlay, b.overlay);
        }
    }

    #[test]
    fn test_tilted_normal_matches_between_paths() {
        let tilted =
            Quad::square(Direction::Up, 0.0, 0.0, 1.0, 1.0, 0.5).with_normal([0.6, 0.8, 0.0]);
        let native = MeshModel::new(Mesh::from_iter([tilted, rotated_panel()]));
        let legacy = native.to_baked();

        let mut context = BlockRenderContext::new();
        let (_, from_native) =
            render_with(&mut context, None, GeometryProvider::Native(&native), 0);
        let (_, from_legacy) =
            render_with(&mut context, None, GeometryProvider::Legacy(&legacy), 0);

        assert_eq!(from_native.len(), 8);
        for (a, b) in from_native.iter().zip(from_legacy.iter()) {
            assert_eq!(a.normal.map(f32::to_bits), b.normal.map(f32::to_bits));
        }
        // Rotated normals come out at byte precision.
        let diagonal = from_native[4].normal;
        assert!((diagonal[0].abs() - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.01);
        assert_eq!(diagonal[1], 0.0);
    }

    #[test]
    fn test_no_world_renders_unshaded() {
        for ao in [true, false] {
            let mut context = BlockRenderContext::new().with_config(
                RenderConfig::default()
                    .with_ambient_occlusion(ao)
                    .with_diffuse_shading(false),
            );
            let model = MeshModel::new(cube());
            let (rendered, out) =
                render_with(&mut context, None, GeometryProvider::Native(&model), 0);
            assert!(rendered);
            assert_eq!(out.len(), 24);
            for vertex in &out {
                assert_eq!(vertex.color, [1.0; 4]);
                assert_eq!(vertex.light, MAX_LIGHT_COORDS);
            }
        }
    }

    #[test]
    fn test_result_tracks_output() {
        let mut context = BlockRenderContext::new();

        let (rendered, out) =
            render_with(&mut context, None, GeometryProvider::Native(&EmptyModel), 0);
        assert!(!rendered);
        assert!(out.is_empty());

        let empty_legacy = SimpleBakedModel::new();
        let (rendered, _) =
            render_with(&mut context, None, GeometryProvider::Legacy(&empty_legacy), 0);
        assert!(!rendered);

        let single = MeshModel::new(top_face());
        let (rendered, out) =
            render_with(&mut context, None, GeometryProvider::Native(&single), 0);
        assert!(rendered);
        assert_eq!(out.len(), 4);

        // Fully enclosed: every face culled.
        let enclosed =
            StaticWorld::from_blocks(Direction::ALL.map(|face| (origin().neighbor(face), stone())));
        let full = MeshModel::new(cube());
        let (rendered, out) =
            render_with(&mut context, Some(&enclosed), GeometryProvider::Native(&full), 0);
        assert!(!rendered);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cache_does_not_leak_between_calls() {
        let mut context = BlockRenderContext::new()
            .with_config(RenderConfig::default().with_diffuse_shading(false));
        let model = MeshModel::new(top_face());

        let mut dark = StaticWorld::new();
        dark.set_ao_level(BlockPosition::new(-1, 1, -1), 0.0);
        let (_, first) =
            render_with(&mut context, Some(&dark), GeometryProvider::Native(&model), 0);
        assert!(shade(&first[0]) < 1.0);

        let open = StaticWorld::new();
        let (_, second) =
            render_with(&mut context, Some(&open), GeometryProvider::Native(&model), 0);
        assert!(second.iter().all(|v| shade(v) == 1.0));
    }

    #[test]
    fn test_reseeded_stream_is_deterministic() {
        struct SeedRecorder {
            draws: RefCell<Vec<[u64; 2]>>,
        }

        impl BlockModel for SeedRecorder {
            fn emit_block_quads(
                &self,
                _world: Option<&dyn WorldView>,
                _block: &BlockState,
                _pos: BlockPosition,
                random: &mut RandomSupplier<'_>,
                _sink: &mut QuadSink<'_>,
            ) {
                let mut draws = self.draws.borrow_mut();
                draws.push(random.get().gen());
                draws.push(random.get().gen());
            }
        }

        let recorder = SeedRecorder {
            draws: RefCell::new(Vec::new()),
        };
        let mut context = BlockRenderContext::new();
        render_with(&mut context, None, GeometryProvider::Native(&recorder), 0);
        render_with(&mut context, None, GeometryProvider::Native(&recorder), 0);

        let draws = recorder.draws.borrow();
        assert_eq!(draws.len(), 4);
        assert!(draws.iter().all(|d| *d == draws[0]));
    }

    #[test]
    fn test_weighted_model_picks_one_variant_per_seed() {
        let variant = |tint: i32| -> Box<dyn BakedModel> {
            let quads: Mesh = Direction::ALL
                .iter()
                .map(|&face| Quad::square(face, 0.0, 0.0, 1.0, 1.0, 0.0).with_tint_index(tint))
                .collect();
            Box::new(MeshModel::new(quads).to_baked())
        };
        let model = WeightedModel::new()
            .with_variant(1, variant(-1))
            .with_variant(1, variant(0));

        let mut context = BlockRenderContext::new()
            .with_config(RenderConfig::default().with_diffuse_shading(false));
        let block = BlockState::new("minecraft:grass_block");
        for seed in 0..16 {
            let mut out = Vec::new();
            let mut rng = StdRng::seed_from_u64(99);
            context.render(
                None,
                GeometryProvider::Legacy(&model),
                &block,
                origin(),
                &MatrixStack::new(),
                &mut out,
                &mut rng,
                seed,
                0,
            );
            assert_eq!(out.len(), 24);
            // Either every face is tinted or none is.
            let first = out[0].color;
            assert!(out.iter().all(|v| v.color == first));
        }
    }

    #[test]
    fn test_top_face_open_sky_is_neutral() {
        let mut context = BlockRenderContext::new();
        let world = StaticWorld::new();
        let model = MeshModel::new(top_face());
        let (_, out) = render_with(&mut context, Some(&world), GeometryProvider::Native(&model), 0);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|v| v.color == [1.0; 4]));
    }

    #[test]
    fn test_occluded_corner_is_darker_than_opposite() {
        let mut context = BlockRenderContext::new();
        let mut world = StaticWorld::new();
        world.set_ao_level(BlockPosition::new(-1, 1, -1), 0.0);
        let model = MeshModel::new(top_face());
        let (_, out) = render_with(&mut context, Some(&world), GeometryProvider::Native(&model), 0);

        let near = out.iter().find(|v| v.position == [0.0, 1.0, 0.0]).unwrap();
        let far = out.iter().find(|v| v.position == [1.0, 1.0, 1.0]).unwrap();
        assert!(shade(near) < shade(far));
    }

    #[test]
    fn test_ao_disabled_is_neutral() {
        let mut world = StaticWorld::new();
        world.set_ao_level(BlockPosition::new(-1, 1, -1), 0.0);
        world.set_ao_level(BlockPosition::new(1, 1, 0), 0.3);
        let top = MeshModel::new(top_face());
        let no_model_ao = MeshModel::new(top_face()).with_ambient_occlusion(false);

        let mut global_off = BlockRenderContext::new()
            .with_config(RenderConfig::default().with_ambient_occlusion(false));
        let (_, out) =
            render_with(&mut global_off, Some(&world), GeometryProvider::Native(&top), 0);
        assert!(out.iter().all(|v| shade(v) == 1.0));

        let mut context = BlockRenderContext::new();
        let (_, out) =
            render_with(&mut context, Some(&world), GeometryProvider::Native(&no_model_ao), 0);
        assert!(out.iter().all(|v| shade(v) == 1.0));
    }

    #[test]
    fn test_identity_transform_keeps_overlay() {
        let mut context = BlockRenderContext::new();
        let mesh = cube();
        let model = MeshModel::new(mesh.clone());
        let (_, out) = render_with(&mut context, None, GeometryProvider::Native(&model), 7);
        assert_eq!(out.len(), 24);
        assert!(out.iter().all(|v| v.overlay == 7));

        let quad = &mesh.quads()[0];
        for (vertex, source) in out.iter().zip(quad.vertices.iter()) {
            assert_eq!(vertex.position, source.position);
            assert_eq!(vertex.normal, source.normal);
        }
    }

    #[test]
    fn test_material_controls_layer_and_light() {
        let glow = Quad::square(Direction::Up, 0.0, 0.0, 1.0, 1.0, 0.0).with_material(
            QuadMaterial::default()
                .with_blend_mode(BlendMode::Translucent)
                .with_emissive(true)
                .with_ambient_occlusion(TriState::False),
        );
        let plain = Quad::square(Direction::Down, 0.0, 0.0, 1.0, 1.0, 0.0)
            .with_light(pack_light(9, 0))
            .with_material(QuadMaterial::default().with_ambient_occlusion(TriState::False));
        let model = MeshModel::new(Mesh::from_iter([glow, plain]));

        let mut world = StaticWorld::new();
        world.set_light(BlockPosition::new(0, -1, 0), pack_light(2, 4));
        let mut buffers = LayeredBuffers::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut context = BlockRenderContext::new();
        let view: &dyn WorldView = &world;
        let rendered = context.render(
            Some(view),
            GeometryProvider::Native(&model),
            &stone(),
            origin(),
            &MatrixStack::new(),
            &mut buffers,
            &mut rng,
            0,
            0,
        );
        assert!(rendered);

        let translucent = buffers.layer(RenderLayer::Translucent).unwrap();
        assert!(translucent.vertices.iter().all(|v| v.light == MAX_LIGHT_COORDS));
        let solid = buffers.layer(RenderLayer::Solid).unwrap();
        assert!(solid.vertices.iter().all(|v| v.light == pack_light(9, 4)));
        // Down face shade.
        assert!(solid.vertices.iter().all(|v| (v.color[0] - 0.5).abs() < 1.0e-6));
    }

    #[test]
    fn test_json_model_renders_through_legacy_path() {
        let json = r##"{
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "up":    { "texture": "#top", "cullface": "up" },
                        "down":  { "texture": "#bottom", "cullface": "down" },
                        "north": { "texture": "#side", "cullface": "north" },
                        "south": { "texture": "#side", "cullface": "south" },
                        "west":  { "texture": "#side", "cullface": "west" },
                        "east":  { "texture": "#side", "cullface": "east" }
                    }
                }
            ]
        }"##;
        let model = JsonModel::from_json(json)
            .unwrap()
            .bake(BlockTransform::default())
            .unwrap();
        let world = StaticWorld::from_blocks([(BlockPosition::new(0, -1, 0), stone())]);
        let mut context = BlockRenderContext::new();
        let (rendered, out) =
            render_with(&mut context, Some(&world), GeometryProvider::Legacy(&model), 0);
        assert!(rendered);
        assert_eq!(out.len(), 5 * 4);
    }

    #[test]
    #[should_panic(expected = "non-finite quad")]
    fn test_non_finite_quad_panics() {
        let broken = Quad::square(Direction::Up, 0.0, 0.0, 1.0, 1.0, 0.0)
            .with_position(1, [f32::NAN, 1.0, 0.0]);
        let model = MeshModel::new(Mesh::from_iter([broken]));
        let mut context = BlockRenderContext::new();
        render_with(&mut context, None, GeometryProvider::Native(&model), 0);
    }
}
