//! Native quad representation.
//!
//! Positions are block-local: a full cube spans `[0, 1]` on every axis.

use super::material::QuadMaterial;
use crate::types::Direction;
use glam::Vec3;

/// Opaque white in ARGB.
pub const WHITE: u32 = 0xFFFF_FFFF;

const EPSILON: f32 = 1.0e-5;

/// One corner of a quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    /// Block-local position.
    pub position: [f32; 3],
    /// Block-local normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Base color, ARGB.
    pub color: u32,
    /// Minimum light coordinate; combined with world light by component-wise max.
    pub light: u32,
}

/// A four-vertex planar polygon covering (part of) one block face.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    pub vertices: [QuadVertex; 4],
    /// The face this quad nominally belongs to.
    pub nominal_face: Direction,
    /// If set, the quad is hidden when the neighbor on this side hides it.
    pub cull_face: Option<Direction>,
    /// Block color index, -1 for untinted.
    pub tint_index: i32,
    pub material: QuadMaterial,
}

impl Quad {
    /// A quad with all corners at the origin, facing `nominal_face`.
    pub fn new(nominal_face: Direction) -> Self {
        let vertex = QuadVertex {
            position: [0.0; 3],
            normal: nominal_face.normal(),
            uv: [0.0; 2],
            color: WHITE,
            light: 0,
        };
        Self {
            vertices: [vertex; 4],
            nominal_face,
            cull_face: None,
            tint_index: -1,
            material: QuadMaterial::default(),
        }
    }

    /// Build an axis-aligned rectangle on `face`.
    ///
    /// `left`, `bottom`, `right`, `top` are measured in the face's own 2D frame
    /// as seen from outside the block; `depth` is the inset from the block
    /// boundary. A quad with zero depth culls against its face.
    pub fn square(
        face: Direction,
        left: f32,
        bottom: f32,
        right: f32,
        top: f32,
        depth: f32,
    ) -> Self {
        let positions = match face {
            Direction::Up => {
                let (d, t, b) = (1.0 - depth, 1.0 - top, 1.0 - bottom);
                [[left, d, t], [left, d, b], [right, d, b], [right, d, t]]
            }
            Direction::Down => [
                [left, depth, top],
                [left, depth, bottom],
                [right, depth, bottom],
                [right, depth, top],
            ],
            Direction::East => {
                let (d, l, r) = (1.0 - depth, 1.0 - left, 1.0 - right);
                [[d, top, l], [d, bottom, l], [d, bottom, r], [d, top, r]]
            }
            Direction::West => [
                [depth, top, left],
                [depth, bottom, left],
                [depth, bottom, right],
                [depth, top, right],
            ],
            Direction::South => {
                let d = 1.0 - depth;
                [[left, top, d], [left, bottom, d], [right, bottom, d], [right, top, d]]
            }
            Direction::North => [
                [1.0 - left, top, depth],
                [1.0 - left, bottom, depth],
                [1.0 - right, bottom, depth],
                [1.0 - right, top, depth],
            ],
        };
        let uvs = [
            [left, 1.0 - top],
            [left, 1.0 - bottom],
            [right, 1.0 - bottom],
            [right, 1.0 - top],
        ];

        let mut quad = Quad::new(face);
        for (i, vertex) in quad.vertices.iter_mut().enumerate() {
            vertex.position = positions[i];
            vertex.uv = uvs[i];
        }
        quad.cull_face = if depth.abs() < EPSILON { Some(face) } else { None };
        quad
    }

    pub fn with_position(mut self, vertex: usize, position: [f32; 3]) -> Self {
        self.vertices[vertex].position = position;
        self
    }

    pub fn with_uv(mut self, vertex: usize, uv: [f32; 2]) -> Self {
        self.vertices[vertex].uv = uv;
        self
    }

    /// Set the same base color on every vertex.
    pub fn with_color(mut self, color: u32) -> Self {
        for vertex in &mut self.vertices {
            vertex.color = color;
        }
        self
    }

    /// Set the same minimum light on every vertex.
    pub fn with_light(mut self, light: u32) -> Self {
        for vertex in &mut self.vertices {
            vertex.light = light;
        }
        self
    }

    /// Set the same normal on every vertex.
    pub fn with_normal(mut self, normal: [f32; 3]) -> Self {
        for vertex in &mut self.vertices {
            vertex.normal = normal;
        }
        self
    }

    pub fn with_cull_face(mut self, cull_face: Option<Direction>) -> Self {
        self.cull_face = cull_face;
        self
    }

    pub fn with_tint_index(mut self, tint_index: i32) -> Self {
        self.tint_index = tint_index;
        self
    }

    pub fn with_material(mut self, material: QuadMaterial) -> Self {
        self.material = material;
        self
    }

    /// Geometric normal from the quad's diagonals, zero for degenerate quads.
    pub fn face_normal(&self) -> [f32; 3] {
        let p = |i: usize| Vec3::from(self.vertices[i].position);
        (p(2) - p(0)).cross(p(3) - p(1)).normalize_or_zero().to_array()
    }

    /// Face used for lighting: the axis closest to the geometric normal.
    pub fn light_face(&self) -> Direction {
        Direction::from_normal(self.face_normal()).unwrap_or(self.nominal_face)
    }

    /// Whether every vertex lies on the block boundary of its light face.
    pub fn is_on_block_face(&self) -> bool {
        let face = self.light_face();
        let axis = face.axis().index();
        let boundary = if face.is_positive() { 1.0 } else { 0.0 };
        self.vertices
            .iter()
            .all(|v| (v.position[axis] - boundary).abs() < EPSILON)
    }

    /// How far vertex `i` sits inside the block, measured from its light face.
    pub fn depth(&self, vertex: usize) -> f32 {
        let face = self.light_face();
        let coord = self.vertices[vertex].position[face.axis().index()];
        let depth = if face.is_positive() { 1.0 - coord } else { coord };
        depth.clamp(0.0, 1.0)
    }

    /// No NaN or infinite coordinates.
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.position.iter().chain(v.normal.iter()).all(|c| c.is_finite()))
    }
}
