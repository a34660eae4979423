//! Structured quad meshes consumed by the native render path.

pub mod material;
pub mod quad;

pub use material::{BlendMode, QuadMaterial, RenderLayer, TriState};
pub use quad::{Quad, QuadVertex, WHITE};

use crate::types::Direction;

/// An immutable list of quads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    quads: Vec<Quad>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Get the number of quads.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

impl FromIterator<Quad> for Mesh {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        Self {
            quads: iter.into_iter().collect(),
        }
    }
}

/// Accumulates quads into a [`Mesh`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    quads: Vec<Quad>,
}

impl MeshBuilder {
    /// Append a quad.
    pub fn push(&mut self, quad: Quad) -> &mut Self {
        self.quads.push(quad);
        self
    }

    /// Append the six faces of an axis-aligned box given in block-local
    /// coordinates. Faces touching the block boundary cull against it.
    pub fn push_cuboid(&mut self, from: [f32; 3], to: [f32; 3], template: &Quad) -> &mut Self {
        for face in Direction::ALL {
            let (left, bottom, right, top, depth) = face_rect(face, from, to);
            let mut quad = Quad::square(face, left, bottom, right, top, depth);
            for (vertex, source) in quad.vertices.iter_mut().zip(template.vertices.iter()) {
                vertex.color = source.color;
                vertex.light = source.light;
            }
            quad.tint_index = template.tint_index;
            quad.material = template.material;
            self.quads.push(quad);
        }
        self
    }

    pub fn build(&mut self) -> Mesh {
        Mesh {
            quads: std::mem::take(&mut self.quads),
        }
    }
}

/// Face-relative rectangle `(left, bottom, right, top, depth)` of a box side.
pub(crate) fn face_rect(
    face: Direction,
    from: [f32; 3],
    to: [f32; 3],
) -> (f32, f32, f32, f32, f32) {
    let [fx, fy, fz] = from;
    let [tx, ty, tz] = to;
    match face {
        Direction::Up => (fx, 1.0 - tz, tx, 1.0 - fz, 1.0 - ty),
        Direction::Down => (fx, fz, tx, tz, fy),
        Direction::West => (fz, fy, tz, ty, fx),
        Direction::East => (1.0 - tz, fy, 1.0 - fz, ty, 1.0 - tx),
        Direction::North => (1.0 - tx, fy, 1.0 - fx, ty, fz),
        Direction::South => (fx, fy, tx, ty, 1.0 - tz),
    }
}
