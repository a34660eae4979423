//! Vertex sinks.
//!
//! The renderer writes finished vertices to a [`VertexSink`] chosen per
//! render layer by a [`BufferSource`]. Sinks are caller-owned; the renderer
//! never flushes or clears them.

use crate::mesh::RenderLayer;
use std::collections::BTreeMap;

/// A finished vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    /// Position after the frame's position matrix.
    pub position: [f32; 3],
    /// Normal after the frame's normal matrix.
    pub normal: [f32; 3],
    /// Base colour times tint, occlusion and diffuse shade (RGBA).
    pub color: [f32; 4],
    pub uv: [f32; 2],
    /// Packed light coordinate.
    pub light: u32,
    /// Overlay texture index.
    pub overlay: u32,
}

/// Receives vertices four at a time, one quad after another.
pub trait VertexSink {
    fn vertex(&mut self, vertex: &VertexOut);
}

/// Maps a render layer to the sink that collects it.
pub trait BufferSource {
    fn buffer(&mut self, layer: RenderLayer) -> &mut dyn VertexSink;
}

impl VertexSink for Vec<VertexOut> {
    fn vertex(&mut self, vertex: &VertexOut) {
        self.push(*vertex);
    }
}

/// Every layer goes to the same list.
impl BufferSource for Vec<VertexOut> {
    fn buffer(&mut self, _layer: RenderLayer) -> &mut dyn VertexSink {
        self
    }
}

/// Vertex list plus triangle indices.
#[derive(Debug, Clone, Default)]
pub struct VertexBuffer {
    pub vertices: Vec<VertexOut>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append another buffer, rebasing its indices.
    pub fn merge(&mut self, other: &VertexBuffer) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }
}

impl VertexSink for VertexBuffer {
    fn vertex(&mut self, vertex: &VertexOut) {
        self.vertices.push(*vertex);
        if self.vertices.len() % 4 == 0 {
            let i0 = self.vertices.len() as u32 - 4;
            // Quads arrive counter-clockwise seen from the front: (0, 1, 2), (0, 2, 3).
            self.indices.extend_from_slice(&[i0, i0 + 1, i0 + 2, i0, i0 + 2, i0 + 3]);
        }
    }
}

impl BufferSource for VertexBuffer {
    fn buffer(&mut self, _layer: RenderLayer) -> &mut dyn VertexSink {
        self
    }
}

/// One [`VertexBuffer`] per render layer, created on first use.
#[derive(Debug, Clone, Default)]
pub struct LayeredBuffers {
    layers: BTreeMap<RenderLayer, VertexBuffer>,
}

impl LayeredBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, layer: RenderLayer) -> Option<&VertexBuffer> {
        self.layers.get(&layer)
    }

    /// Non-empty layers in draw order.
    pub fn layers(&self) -> impl Iterator<Item = (RenderLayer, &VertexBuffer)> {
        self.layers
            .iter()
            .filter(|(_, buffer)| !buffer.is_empty())
            .map(|(layer, buffer)| (*layer, buffer))
    }

    pub fn total_vertices(&self) -> usize {
        self.layers.values().map(VertexBuffer::vertex_count).sum()
    }

    /// All layers merged in draw order.
    pub fn merged(&self) -> VertexBuffer {
        let mut merged = VertexBuffer::new();
        for (_, buffer) in self.layers() {
            merged.merge(buffer);
        }
        merged
    }
}

impl BufferSource for LayeredBuffers {
    fn buffer(&mut self, layer: RenderLayer) -> &mut dyn VertexSink {
        self.layers.entry(layer).or_default()
    }
}
