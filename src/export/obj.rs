//! Wavefront OBJ export.
//!
//! OBJ is a simple, widely-supported text-based 3D format. Vertex colours
//! (shade, tint and AO already multiplied in) go on the `v` lines as the
//! common `v x y z r g b` extension, so a rendered block can be inspected
//! in any viewer.

use crate::error::Result;
use crate::render::{LayeredBuffers, VertexBuffer};
use std::fmt::Write;

/// Export one vertex buffer as an OBJ object named `name`.
pub fn export_obj(buffer: &VertexBuffer, name: &str) -> Result<String> {
    // ~60 bytes per v/vt/vn line, ~40 per face
    let mut obj =
        String::with_capacity(256 + buffer.vertex_count() * 180 + buffer.triangle_count() * 40);

    writeln!(obj, "# Block Renderer OBJ Export")?;
    writeln!(obj, "# Vertices: {}", buffer.vertex_count())?;
    writeln!(obj, "# Triangles: {}", buffer.triangle_count())?;
    writeln!(obj)?;
    writeln!(obj, "o {}", name)?;

    for vertex in &buffer.vertices {
        let [x, y, z] = vertex.position;
        let [r, g, b, _] = vertex.color;
        writeln!(obj, "v {} {} {} {} {} {}", x, y, z, r, g, b)?;
    }
    for vertex in &buffer.vertices {
        // OBJ has V pointing up
        writeln!(obj, "vt {} {}", vertex.uv[0], 1.0 - vertex.uv[1])?;
    }
    for vertex in &buffer.vertices {
        let [x, y, z] = vertex.normal;
        writeln!(obj, "vn {} {} {}", x, y, z)?;
    }

    for tri in buffer.indices.chunks_exact(3) {
        // OBJ indices are 1-based
        let (i0, i1, i2) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(
            obj,
            "f {}/{}/{} {}/{}/{} {}/{}/{}",
            i0, i0, i0, i1, i1, i1, i2, i2, i2
        )?;
    }

    Ok(obj)
}

/// Export every non-empty layer as one combined object.
pub fn export_layers_obj(buffers: &LayeredBuffers, name: &str) -> Result<String> {
    export_obj(&buffers.merged(), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{VertexOut, VertexSink};

    fn vertex(position: [f32; 3], uv: [f32; 2]) -> VertexOut {
        VertexOut {
            position,
            normal: [0.0, 1.0, 0.0],
            color: [1.0, 0.5, 0.0, 1.0],
            uv,
            light: 0,
            overlay: 0,
        }
    }

    #[test]
    fn test_export_simple_obj() {
        let mut buffer = VertexBuffer::new();
        buffer.vertex(&vertex([0.0, 0.0, 0.0], [0.0, 0.0]));
        buffer.vertex(&vertex([0.0, 0.0, 1.0], [0.0, 1.0]));
        buffer.vertex(&vertex([1.0, 0.0, 1.0], [1.0, 1.0]));
        buffer.vertex(&vertex([1.0, 0.0, 0.0], [1.0, 0.0]));

        let obj = export_obj(&buffer, "test").unwrap();

        assert!(obj.contains("o test"));
        assert!(obj.contains("v 0 0 0 1 0.5 0"));
        assert!(obj.contains("vt 0 1"));
        assert!(obj.contains("vn 0 1 0"));
        assert!(obj.contains("f 1/1/1 2/2/2 3/3/3"));
        assert!(obj.contains("f 1/1/1 3/3/3 4/4/4"));
    }

    #[test]
    fn test_export_empty_layers() {
        let obj = export_layers_obj(&LayeredBuffers::new(), "empty").unwrap();
        assert!(obj.contains("# Vertices: 0"));
        assert!(!obj.contains("\nf "));
    }
}
