//! Geometry providers.
//!
//! A provider either speaks the structured quad API ([`BlockModel`]) or only
//! hands out fixed-format quads per face ([`BakedModel`]). The render context
//! accepts both through [`GeometryProvider`].

mod baked_quad;
pub mod json;
mod weighted;

pub(crate) use baked_quad::quantize_normal;
pub use baked_quad::{BakedQuad, VERTEX_STRIDE};
pub use json::{JsonModel, ModelElement, ModelFace};
pub use weighted::WeightedModel;

use crate::mesh::Mesh;
use crate::render::{QuadSink, RandomSupplier};
use crate::types::{BlockPosition, BlockState, Direction};
use crate::world::WorldView;
use rand::rngs::StdRng;

/// A provider that emits structured quads.
pub trait BlockModel {
    /// Whether smooth lighting applies to this model's quads.
    fn use_ambient_occlusion(&self) -> bool {
        true
    }

    /// Push this block's quads into `sink`. Emitting nothing is valid.
    fn emit_block_quads(
        &self,
        world: Option<&dyn WorldView>,
        block: &BlockState,
        pos: BlockPosition,
        random: &mut RandomSupplier<'_>,
        sink: &mut QuadSink<'_>,
    );
}

/// A provider that only exposes fixed-format quads per cull face.
pub trait BakedModel {
    /// Quads culled against `cull_face`, or the never-culled list for `None`.
    fn quads(
        &self,
        block: &BlockState,
        cull_face: Option<Direction>,
        rng: &mut StdRng,
    ) -> &[BakedQuad];

    fn use_ambient_occlusion(&self) -> bool {
        true
    }
}

/// The geometry a render call draws.
#[derive(Clone, Copy)]
pub enum GeometryProvider<'m> {
    Native(&'m dyn BlockModel),
    Legacy(&'m dyn BakedModel),
}

impl GeometryProvider<'_> {
    pub fn use_ambient_occlusion(&self) -> bool {
        match self {
            GeometryProvider::Native(model) => model.use_ambient_occlusion(),
            GeometryProvider::Legacy(model) => model.use_ambient_occlusion(),
        }
    }
}

/// Native provider drawing a fixed mesh.
#[derive(Debug, Clone)]
pub struct MeshModel {
    mesh: Mesh,
    ambient_occlusion: bool,
}

impl MeshModel {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            ambient_occlusion: true,
        }
    }

    pub fn with_ambient_occlusion(mut self, ambient_occlusion: bool) -> Self {
        self.ambient_occlusion = ambient_occlusion;
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// The same geometry in fixed format, grouped by cull face.
    pub fn to_baked(&self) -> SimpleBakedModel {
        SimpleBakedModel::from_mesh(&self.mesh).with_ambient_occlusion(self.ambient_occlusion)
    }
}

impl BlockModel for MeshModel {
    fn use_ambient_occlusion(&self) -> bool {
        self.ambient_occlusion
    }

    fn emit_block_quads(
        &self,
        _world: Option<&dyn WorldView>,
        _block: &BlockState,
        _pos: BlockPosition,
        _random: &mut RandomSupplier<'_>,
        sink: &mut QuadSink<'_>,
    ) {
        sink.accept_mesh(&self.mesh);
    }
}

/// Legacy provider holding pre-baked quads per cull face.
#[derive(Debug, Clone, Default)]
pub struct SimpleBakedModel {
    faces: [Vec<BakedQuad>; 6],
    general: Vec<BakedQuad>,
    ambient_occlusion: bool,
}

impl SimpleBakedModel {
    pub fn new() -> Self {
        Self {
            ambient_occlusion: true,
            ..Default::default()
        }
    }

    /// Bake a mesh, filing each quad under its cull face.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut model = Self::new();
        for quad in mesh.quads() {
            model.add_quad(quad.cull_face, BakedQuad::encode(quad));
        }
        model
    }

    pub fn with_ambient_occlusion(mut self, ambient_occlusion: bool) -> Self {
        self.ambient_occlusion = ambient_occlusion;
        self
    }

    pub fn add_quad(&mut self, cull_face: Option<Direction>, quad: BakedQuad) {
        match cull_face {
            Some(face) => self.faces[face.index()].push(quad),
            None => self.general.push(quad),
        }
    }

    pub fn quad_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum::<usize>() + self.general.len()
    }
}

impl BakedModel for SimpleBakedModel {
    fn quads(
        &self,
        _block: &BlockState,
        cull_face: Option<Direction>,
        _rng: &mut StdRng,
    ) -> &[BakedQuad] {
        match cull_face {
            Some(face) => &self.faces[face.index()],
            None => &self.general,
        }
    }

    fn use_ambient_occlusion(&self) -> bool {
        self.ambient_occlusion
    }
}
