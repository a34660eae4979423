//! Fixed-format quads used by legacy geometry providers.
//!
//! Each vertex occupies eight `u32` slots:
//!
//! | slot | content                                   |
//! |------|-------------------------------------------|
//! | 0-2  | x, y, z as `f32` bits                     |
//! | 3    | colour, ABGR                              |
//! | 4-5  | u, v as `f32` bits                        |
//! | 6    | packed light coordinate                   |
//! | 7    | normal as three signed bytes (x, y, z)    |
//!
//! A packed normal of zero means the quad uses its face normal.

use crate::mesh::{Quad, QuadMaterial};
use crate::types::Direction;

/// Number of `u32` slots per vertex.
pub const VERTEX_STRIDE: usize = 8;

const POSITION: usize = 0;
const COLOR: usize = 3;
const UV: usize = 4;
const LIGHT: usize = 6;
const NORMAL: usize = 7;

/// A quad in the legacy fixed vertex layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedQuad {
    pub vertex_data: [u32; 4 * VERTEX_STRIDE],
    /// Block color index, -1 for untinted.
    pub tint_index: i32,
    pub face: Direction,
    /// Apply directional diffuse shade.
    pub shade: bool,
}

impl BakedQuad {
    /// Pack a native quad. Only the diffuse flag of its material survives.
    pub fn encode(quad: &Quad) -> Self {
        let face_normal = quad.nominal_face.normal();
        let mut vertex_data = [0u32; 4 * VERTEX_STRIDE];

        for (i, vertex) in quad.vertices.iter().enumerate() {
            let base = i * VERTEX_STRIDE;
            for axis in 0..3 {
                vertex_data[base + POSITION + axis] = vertex.position[axis].to_bits();
            }
            vertex_data[base + COLOR] = swap_red_blue(vertex.color);
            vertex_data[base + UV] = vertex.uv[0].to_bits();
            vertex_data[base + UV + 1] = vertex.uv[1].to_bits();
            vertex_data[base + LIGHT] = vertex.light;
            vertex_data[base + NORMAL] = if vertex.normal == face_normal {
                0
            } else {
                pack_normal(vertex.normal)
            };
        }

        Self {
            vertex_data,
            tint_index: quad.tint_index,
            face: quad.nominal_face,
            shade: quad.material.diffuse_shading,
        }
    }

    /// Rebuild the native quad, tagging it with the cull face it was queried for.
    pub fn to_quad(&self, cull_face: Option<Direction>) -> Quad {
        let mut quad = Quad::new(self.face)
            .with_cull_face(cull_face)
            .with_tint_index(self.tint_index)
            .with_material(QuadMaterial::default().with_diffuse_shading(self.shade));

        for i in 0..4 {
            let vertex = &mut quad.vertices[i];
            vertex.position = self.position(i);
            vertex.color = swap_red_blue(self.vertex_data[i * VERTEX_STRIDE + COLOR]);
            vertex.uv = self.uv(i);
            vertex.light = self.light(i);
            let packed = self.vertex_data[i * VERTEX_STRIDE + NORMAL];
            if packed != 0 {
                vertex.normal = unpack_normal(packed);
            }
        }
        quad
    }

    pub fn position(&self, vertex: usize) -> [f32; 3] {
        let base = vertex * VERTEX_STRIDE + POSITION;
        [
            f32::from_bits(self.vertex_data[base]),
            f32::from_bits(self.vertex_data[base + 1]),
            f32::from_bits(self.vertex_data[base + 2]),
        ]
    }

    pub fn uv(&self, vertex: usize) -> [f32; 2] {
        let base = vertex * VERTEX_STRIDE + UV;
        [
            f32::from_bits(self.vertex_data[base]),
            f32::from_bits(self.vertex_data[base + 1]),
        ]
    }

    pub fn light(&self, vertex: usize) -> u32 {
        self.vertex_data[vertex * VERTEX_STRIDE + LIGHT]
    }

    pub fn has_tint(&self) -> bool {
        self.tint_index >= 0
    }
}

/// ARGB <-> ABGR.
fn swap_red_blue(color: u32) -> u32 {
    (color & 0xFF00_FF00) | ((color >> 16) & 0xFF) | ((color & 0xFF) << 16)
}

/// Round a normal to the byte precision of the fixed layout.
///
/// Every emitted normal goes through this, so a quad yields the same normal
/// whether it arrives natively or through a [`BakedQuad`]. Axis normals are
/// unchanged and the rounding is idempotent. Normals that round to zero
/// become the face normal, as a zero packed normal does.
pub(crate) fn quantize_normal(normal: [f32; 3], face: Direction) -> [f32; 3] {
    match pack_normal(normal) {
        0 => face.normal(),
        packed => unpack_normal(packed),
    }
}

fn pack_normal(normal: [f32; 3]) -> u32 {
    let byte = |c: f32| ((c.clamp(-1.0, 1.0) * 127.0).round() as i8) as u8 as u32;
    byte(normal[0]) | (byte(normal[1]) << 8) | (byte(normal[2]) << 16)
}

fn unpack_normal(packed: u32) -> [f32; 3] {
    let component = |shift: u32| ((packed >> shift) & 0xFF) as u8 as i8 as f32 / 127.0;
    [component(0), component(8), component(16)]
}
