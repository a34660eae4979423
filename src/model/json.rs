//! JSON block models.
//!
//! Parses the element/face layout of `models/*.json` files and bakes it into
//! fixed-format quads. Texture references are kept as strings; atlas lookup
//! is outside the renderer, so UVs stay in the face's own 0-1 space.

use super::{BakedQuad, SimpleBakedModel};
use crate::error::{RenderError, Result};
use crate::mesh::{face_rect, Quad, QuadMaterial};
use crate::types::{BlockTransform, Direction, ElementRotation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed block model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonModel {
    /// Whether to use ambient occlusion.
    #[serde(default = "default_ao", rename = "ambientocclusion")]
    pub ambient_occlusion: bool,

    /// Texture variable definitions.
    #[serde(default)]
    pub textures: HashMap<String, String>,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<ModelElement>,
}

fn default_ao() -> bool {
    true
}

impl JsonModel {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Bake every element face, rotated by a blockstate variant transform.
    pub fn bake(&self, transform: BlockTransform) -> Result<SimpleBakedModel> {
        if !transform.is_axis_aligned() {
            return Err(RenderError::InvalidModel(format!(
                "block rotation x={} y={} is not a multiple of 90 degrees",
                transform.x, transform.y
            )));
        }

        let mut model = SimpleBakedModel::new().with_ambient_occlusion(self.ambient_occlusion);
        for (index, element) in self.elements.iter().enumerate() {
            element.validate().map_err(|reason| {
                RenderError::InvalidModel(format!("element {}: {}", index, reason))
            })?;

            // Fixed order keeps baked output independent of map iteration.
            for face in Direction::ALL {
                let Some(model_face) = element.faces.get(&face) else {
                    continue;
                };
                let quad = element.bake_face(face, model_face, &transform);
                model.add_quad(quad.cull_face, BakedQuad::encode(&quad));
            }
        }
        Ok(model)
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives shade.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

fn default_shade() -> bool {
    true
}

impl ModelElement {
    fn validate(&self) -> std::result::Result<(), String> {
        for axis in 0..3 {
            if self.from[axis] > self.to[axis] {
                return Err(format!("from {:?} exceeds to {:?}", self.from, self.to));
            }
            if !self.from[axis].is_finite() || !self.to[axis].is_finite() {
                return Err("non-finite bounds".to_string());
            }
        }
        Ok(())
    }

    /// Default UV rectangle for a face, in 0-16 texture space.
    pub fn default_uv(&self, face: Direction) -> [f32; 4] {
        let [fx, fy, fz] = self.from;
        let [tx, ty, tz] = self.to;
        match face {
            Direction::Down => [fx, 16.0 - tz, tx, 16.0 - fz],
            Direction::Up => [fx, fz, tx, tz],
            Direction::North => [16.0 - tx, 16.0 - ty, 16.0 - fx, 16.0 - fy],
            Direction::South => [fx, 16.0 - ty, tx, 16.0 - fy],
            Direction::West => [fz, 16.0 - ty, tz, 16.0 - fy],
            Direction::East => [16.0 - tz, 16.0 - ty, 16.0 - fz, 16.0 - fy],
        }
    }

    fn bake_face(
        &self,
        face: Direction,
        model_face: &ModelFace,
        transform: &BlockTransform,
    ) -> Quad {
        let from = self.from.map(|c| c / 16.0);
        let to = self.to.map(|c| c / 16.0);
        let (left, bottom, right, top, depth) = face_rect(face, from, to);

        let uv = model_face.uv.unwrap_or_else(|| self.default_uv(face)).map(|c| c / 16.0);
        let uvs = rotate_uvs(
            [[uv[0], uv[1]], [uv[0], uv[3]], [uv[2], uv[3]], [uv[2], uv[1]]],
            model_face.rotation,
        );

        let mut quad = Quad::square(face, left, bottom, right, top, depth)
            .with_cull_face(model_face.cullface)
            .with_tint_index(model_face.tintindex)
            .with_material(QuadMaterial::default().with_diffuse_shading(self.shade));

        for (vertex, uv) in quad.vertices.iter_mut().zip(uvs) {
            vertex.uv = uv;
            if let Some(rotation) = &self.rotation {
                vertex.position = rotation.apply(vertex.position);
                vertex.normal = rotation.apply_normal(vertex.normal);
            }
            vertex.position = transform.apply(vertex.position);
            vertex.normal = transform.apply_normal(vertex.normal);
        }

        quad.nominal_face = face.rotate_by_transform(transform.x, transform.y);
        quad.cull_face = quad
            .cull_face
            .map(|cull| cull.rotate_by_transform(transform.x, transform.y));
        quad
    }
}

/// Rotate UVs by 90-degree steps.
fn rotate_uvs(uvs: [[f32; 2]; 4], rotation: i32) -> [[f32; 2]; 4] {
    let steps = ((rotation / 90) % 4 + 4) % 4;
    let mut result = uvs;
    for _ in 0..steps {
        result = [result[3], result[0], result[1], result[2]];
    }
    result
}

/// A face of a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Face direction for culling.
    #[serde(default)]
    pub cullface: Option<Direction>,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub rotation: i32,
    /// Tint index for biome coloring (-1 = no tint).
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}
