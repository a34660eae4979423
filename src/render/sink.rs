//! The quad target handed to geometry providers, and the shared
//! light-shade-transform-emit stage both consumption paths end in.

use super::ao::AoCalculator;
use super::block_info::BlockRenderInfo;
use super::matrix::MatrixEntry;
use super::output::{BufferSource, VertexOut, VertexSink};
use crate::mesh::{Quad, RenderLayer};
use crate::model::quantize_normal;
use crate::types::light::{max_light, MAX_LIGHT_COORDS};

/// Transform and overlay captured once per render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameState {
    pub transform: MatrixEntry,
    pub overlay: u32,
}

/// Resolves layer buffers and remembers whether any was requested.
struct OutputSelector<'a> {
    buffers: &'a mut dyn BufferSource,
    did_output: bool,
}

impl OutputSelector<'_> {
    fn buffer(&mut self, layer: RenderLayer) -> &mut dyn VertexSink {
        self.did_output = true;
        self.buffers.buffer(layer)
    }
}

/// Receives a block's quads during one render call.
///
/// Native providers push [`Quad`]s or whole meshes; legacy models are
/// drained face by face. Both end in the same emit stage, so equivalent
/// geometry produces identical vertices whichever way it arrives.
pub struct QuadSink<'a> {
    pub(super) info: &'a BlockRenderInfo<'a>,
    lighting: &'a mut AoCalculator,
    frame: FrameState,
    output: OutputSelector<'a>,
}

impl<'a> QuadSink<'a> {
    pub(crate) fn new(
        info: &'a BlockRenderInfo<'a>,
        lighting: &'a mut AoCalculator,
        frame: FrameState,
        buffers: &'a mut dyn BufferSource,
    ) -> Self {
        Self {
            info,
            lighting,
            frame,
            output: OutputSelector {
                buffers,
                did_output: false,
            },
        }
    }

    /// Emit one quad.
    pub fn emit_quad(&mut self, quad: &Quad) {
        self.render_quad(quad);
    }

    /// Whether any vertex has been written during this call.
    pub fn did_output(&self) -> bool {
        self.output.did_output
    }

    /// Top-of-stack transform for this call.
    pub fn transform(&self) -> &MatrixEntry {
        &self.frame.transform
    }

    pub fn overlay(&self) -> u32 {
        self.frame.overlay
    }

    /// Light, shade, transform and write one quad.
    ///
    /// # Panics
    ///
    /// Panics if the quad has a NaN or infinite coordinate.
    pub(super) fn render_quad(&mut self, quad: &Quad) {
        let info = self.info;
        assert!(
            quad.is_finite(),
            "non-finite quad emitted for {} at {:?}",
            info.block().name,
            info.pos()
        );

        if !info.should_draw_face(quad.cull_face) {
            return;
        }

        let lighting = self.lighting.compute_quad(info, quad);
        let shade = info.diffuse_shade(quad.light_face(), quad.material.diffuse_shading);
        let tint = info.block_color(quad.tint_index);
        let layer = quad.material.blend_mode.layer_or(info.default_layer());
        let frame = self.frame;

        let sink = self.output.buffer(layer);
        for (i, vertex) in quad.vertices.iter().enumerate() {
            let light = if quad.material.emissive {
                MAX_LIGHT_COORDS
            } else {
                max_light(vertex.light, lighting.light[i])
            };

            let base = unpack_argb(vertex.color);
            let factor = lighting.ao[i] * shade;
            let color = [
                base[0] * tint[0] * factor,
                base[1] * tint[1] * factor,
                base[2] * tint[2] * factor,
                base[3] * tint[3],
            ];

            let normal = quantize_normal(vertex.normal, quad.nominal_face);
            sink.vertex(&VertexOut {
                position: frame.transform.transform_position(vertex.position),
                normal: frame.transform.transform_normal(normal),
                color,
                uv: vertex.uv,
                light,
                overlay: frame.overlay,
            });
        }
    }
}

/// ARGB to RGBA floats.
fn unpack_argb(color: u32) -> [f32; 4] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), channel(24)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_argb() {
        assert_eq!(unpack_argb(0xFFFF_FFFF), [1.0; 4]);
        assert_eq!(unpack_argb(0x00FF_0000), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(unpack_argb(0x8000_00FF)[2], 1.0);
    }
}
