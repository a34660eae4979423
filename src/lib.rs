//! # Block Renderer
//!
//! Renders a single Minecraft-style block model into vertex output, with
//! smooth lighting, ambient occlusion, culling, tinting and directional
//! shading.
//!
//! ## Overview
//!
//! A geometry provider describes a block either as structured quads
//! ([`BlockModel`]) or as fixed-format baked quads per face
//! ([`BakedModel`]). [`BlockRenderContext::render`] lights both kinds the
//! same way and writes transformed vertices into whatever buffers the
//! caller supplies.
//!
//! ## Quick Start
//!
//! ```ignore
//! use block_renderer::{
//!     BlockPosition, BlockRenderContext, BlockState, BlockTransform, GeometryProvider,
//!     JsonModel, LayeredBuffers, MatrixStack, StaticWorld,
//! };
//! use rand::SeedableRng;
//!
//! let model = JsonModel::from_json(json)?.bake(BlockTransform::default())?;
//! let world = StaticWorld::from_blocks(blocks);
//! let mut buffers = LayeredBuffers::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//!
//! let mut context = BlockRenderContext::new();
//! let drew = context.render(
//!     Some(&world),
//!     GeometryProvider::Legacy(&model),
//!     &BlockState::new("minecraft:stone"),
//!     BlockPosition::new(0, 0, 0),
//!     &MatrixStack::new(),
//!     &mut buffers,
//!     &mut rng,
//!     42,
//!     0,
//! );
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod mesh;
pub mod model;
pub mod render;
pub mod tint;
pub mod types;
pub mod world;

// Re-export main types for convenience
pub use config::RenderConfig;
pub use error::{RenderError, Result};
pub use export::{export_layers_obj, export_obj};
pub use mesh::{BlendMode, Mesh, MeshBuilder, Quad, QuadMaterial, QuadVertex, RenderLayer, TriState};
pub use model::{
    BakedModel, BakedQuad, BlockModel, GeometryProvider, JsonModel, MeshModel, SimpleBakedModel,
    WeightedModel,
};
pub use render::{
    AoCalculator, BlockRenderContext, BlockRenderInfo, BufferSource, LayeredBuffers, MatrixEntry,
    MatrixStack, QuadSink, RandomSupplier, VertexBuffer, VertexOut, VertexSink,
};
pub use tint::{BlockColors, TintColors, TintProvider};
pub use types::{Axis, BlockPosition, BlockState, BlockTransform, Direction, ElementRotation};
pub use world::{LightingConfig, StaticWorld, WorldView};
