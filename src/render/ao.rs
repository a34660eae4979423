//! Smooth lighting and ambient occlusion.
//!
//! Every face of the unit block has four corners. A corner's value is the
//! mean of four samples taken in the plane in front of the face: the cell
//! straight ahead, the two cells beside the corner and the diagonal cell.
//! A vertex interpolates its face's four corners bilinearly by its position
//! in the face plane. Quads inset from the block boundary blend the plane in
//! front of the face with the block's own plane by their depth.
//!
//! World access goes through two injected sources, [`BrightnessSource`] and
//! [`OcclusionSource`]. Samples are memoised per position until [`AoCalculator::clear`].

use super::block_info::BlockRenderInfo;
use crate::mesh::Quad;
use crate::types::light::{blend_light, mean_light, MAX_LIGHT_COORDS};
use crate::types::{BlockPosition, BlockState, Direction};
use crate::world::WorldView;
use std::collections::HashMap;

const EPSILON: f32 = 1.0e-5;

/// Supplies the packed light coordinate at a position.
pub trait BrightnessSource {
    fn brightness(
        &self,
        world: Option<&dyn WorldView>,
        pos: BlockPosition,
        block: &BlockState,
    ) -> u32;
}

/// Supplies how much light a position lets through to adjacent corners, 0.0-1.0.
pub trait OcclusionSource {
    fn ao_level(
        &self,
        world: Option<&dyn WorldView>,
        pos: BlockPosition,
        block: &BlockState,
    ) -> f32;
}

/// Reads [`WorldView::light_coords`]; full brightness without a world.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldBrightness;

impl BrightnessSource for WorldBrightness {
    fn brightness(
        &self,
        world: Option<&dyn WorldView>,
        pos: BlockPosition,
        block: &BlockState,
    ) -> u32 {
        match world {
            Some(world) => world.light_coords(pos, block),
            None => MAX_LIGHT_COORDS,
        }
    }
}

/// Reads [`WorldView::ao_level`]; no occlusion without a world.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldOcclusion;

impl OcclusionSource for WorldOcclusion {
    fn ao_level(
        &self,
        world: Option<&dyn WorldView>,
        pos: BlockPosition,
        block: &BlockState,
    ) -> f32 {
        match world {
            Some(world) => world.ao_level(pos, block),
            None => 1.0,
        }
    }
}

/// Light and occlusion at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexLight {
    /// Packed light coordinate.
    pub light: u32,
    /// Occlusion shade, 1.0 for none.
    pub ao: f32,
}

/// Per-vertex lighting of one quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadLighting {
    pub light: [u32; 4],
    pub ao: [f32; 4],
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    light: u32,
    ao: f32,
}

pub struct AoCalculator {
    brightness: Box<dyn BrightnessSource>,
    occlusion: Box<dyn OcclusionSource>,
    cache: HashMap<BlockPosition, Sample>,
    /// Stands in for empty positions.
    air: BlockState,
}

impl AoCalculator {
    pub fn new(brightness: Box<dyn BrightnessSource>, occlusion: Box<dyn OcclusionSource>) -> Self {
        Self {
            brightness,
            occlusion,
            cache: HashMap::new(),
            air: BlockState::air(),
        }
    }

    /// Forget every memoised sample.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of positions sampled since the last clear.
    pub fn cached_samples(&self) -> usize {
        self.cache.len()
    }

    /// Light and occlusion for a point on `face` at block-local `local`,
    /// using the block's default smooth-lighting setting.
    pub fn compute_vertex(
        &mut self,
        info: &BlockRenderInfo<'_>,
        face: Direction,
        local: [f32; 3],
    ) -> VertexLight {
        let smooth = info.smooth_lighting(&Default::default());
        self.vertex_light(info, face, local, smooth)
    }

    /// Lighting for every vertex of `quad`, honouring its material.
    pub fn compute_quad(&mut self, info: &BlockRenderInfo<'_>, quad: &Quad) -> QuadLighting {
        let face = quad.light_face();
        let smooth = info.smooth_lighting(&quad.material);

        if !smooth {
            // Flat: one sample for the whole quad.
            let pos = if quad.is_on_block_face() {
                info.pos().neighbor(face)
            } else {
                info.pos()
            };
            let light = self.sample(info.world(), pos).light;
            return QuadLighting {
                light: [light; 4],
                ao: [1.0; 4],
            };
        }

        let mut lighting = QuadLighting {
            light: [0; 4],
            ao: [1.0; 4],
        };
        for (i, vertex) in quad.vertices.iter().enumerate() {
            let vertex_light = self.vertex_light(info, face, vertex.position, true);
            lighting.light[i] = vertex_light.light;
            lighting.ao[i] = vertex_light.ao;
        }
        lighting
    }

    fn vertex_light(
        &mut self,
        info: &BlockRenderInfo<'_>,
        face: Direction,
        local: [f32; 3],
        smooth: bool,
    ) -> VertexLight {
        let world = info.world();
        let coord = local[face.axis().index()];
        let depth = if face.is_positive() { 1.0 - coord } else { coord }.clamp(0.0, 1.0);
        let on_face = depth < EPSILON;

        if !smooth {
            let pos = if on_face { info.pos().neighbor(face) } else { info.pos() };
            return VertexLight {
                light: self.sample(world, pos).light,
                ao: 1.0,
            };
        }

        let (u_dir, v_dir) = tangents(face);
        let u = local[u_dir.axis().index()].clamp(0.0, 1.0);
        let v = local[v_dir.axis().index()].clamp(0.0, 1.0);
        let weights = [(1.0 - u) * (1.0 - v), u * (1.0 - v), u * v, (1.0 - u) * v];

        let outer = self.interpolate(world, info.pos().neighbor(face), face, weights);
        if on_face {
            return outer;
        }

        let inner = self.interpolate(world, info.pos(), face, weights);
        VertexLight {
            light: blend_light([outer.light, inner.light, 0, 0], [1.0 - depth, depth, 0.0, 0.0]),
            ao: outer.ao * (1.0 - depth) + inner.ao * depth,
        }
    }

    /// Bilinear blend of the four corner values of the plane at `plane`.
    fn interpolate(
        &mut self,
        world: Option<&dyn WorldView>,
        plane: BlockPosition,
        face: Direction,
        weights: [f32; 4],
    ) -> VertexLight {
        let corners = self.corners(world, plane, face);
        let lights = corners.map(|c| c.light);
        let ao = corners.iter().zip(weights.iter()).map(|(c, w)| c.ao * w).sum();
        VertexLight {
            light: blend_light(lights, weights),
            ao,
        }
    }

    /// Corner values ordered (-U,-V), (+U,-V), (+U,+V), (-U,+V).
    fn corners(
        &mut self,
        world: Option<&dyn WorldView>,
        plane: BlockPosition,
        face: Direction,
    ) -> [Sample; 4] {
        let (u_dir, v_dir) = tangents(face);
        let center = self.sample(world, plane);

        let steps = [
            (u_dir.opposite(), v_dir.opposite()),
            (u_dir, v_dir.opposite()),
            (u_dir, v_dir),
            (u_dir.opposite(), v_dir),
        ];
        steps.map(|(du, dv)| {
            let side_u = self.sample(world, plane.neighbor(du));
            let side_v = self.sample(world, plane.neighbor(dv));
            let diagonal = self.sample(world, plane.neighbor(du).neighbor(dv));
            Sample {
                light: mean_light(side_u.light, side_v.light, diagonal.light, center.light),
                ao: (center.ao + side_u.ao + side_v.ao + diagonal.ao) * 0.25,
            }
        })
    }

    fn sample(&mut self, world: Option<&dyn WorldView>, pos: BlockPosition) -> Sample {
        if let Some(sample) = self.cache.get(&pos) {
            return *sample;
        }

        let block = world.and_then(|w| w.block_state(pos)).unwrap_or(&self.air);
        let sample = Sample {
            light: self.brightness.brightness(world, pos, block),
            ao: self.occlusion.ao_level(world, pos, block),
        };
        self.cache.insert(pos, sample);
        sample
    }
}

impl Default for AoCalculator {
    fn default() -> Self {
        Self::new(Box::new(WorldBrightness), Box::new(WorldOcclusion))
    }
}

/// In-plane axes of a face, both pointing toward positive coordinates.
fn tangents(face: Direction) -> (Direction, Direction) {
    match face {
        Direction::Up | Direction::Down => (Direction::East, Direction::South),
        Direction::North | Direction::South => (Direction::East, Direction::Up),
        Direction::West | Direction::East => (Direction::South, Direction::Up),
    }
}
