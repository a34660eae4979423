//! Native path: structured quads and meshes.

use super::sink::QuadSink;
use crate::mesh::Mesh;

impl QuadSink<'_> {
    /// Emit every quad of a mesh in order.
    pub fn accept_mesh(&mut self, mesh: &Mesh) {
        for quad in mesh.quads() {
            self.render_quad(quad);
        }
    }
}
