//! Single-block rendering.
//!
//! [`BlockRenderContext::render`] primes a [`BlockRenderInfo`], clears the
//! [`AoCalculator`] and hands the geometry provider a [`QuadSink`]. Native
//! quads and legacy baked quads meet in one lighting and transform stage
//! before reaching the caller's [`BufferSource`].

mod ao;
mod block_info;
mod context;
mod legacy_consumer;
mod matrix;
mod output;
mod quad_consumer;
mod random;
mod sink;

pub use ao::{
    AoCalculator, BrightnessSource, OcclusionSource, QuadLighting, VertexLight, WorldBrightness,
    WorldOcclusion,
};
pub use block_info::BlockRenderInfo;
pub use context::BlockRenderContext;
pub use matrix::{MatrixEntry, MatrixStack};
pub use output::{BufferSource, LayeredBuffers, VertexBuffer, VertexOut, VertexSink};
pub use random::RandomSupplier;
pub use sink::QuadSink;
