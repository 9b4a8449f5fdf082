//! Binary STL output.
//!
//! Standard 80-byte header followed by little-endian triangle facets.
//! Facet normals are recomputed from the vertex winding.

use std::io::{self, Write};

use crate::math::Vector3;
use crate::tessellation::TriangleMesh;

/// Writes a `TriangleMesh` as a binary STL to the given writer.
///
/// # Errors
///
/// Propagates any I/O error from the underlying writer.
#[allow(clippy::cast_possible_truncation)]
pub fn write_stl<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> io::Result<()> {
    let header = b"Binary STL from poloidal\0";
    let mut header_buf = [0u8; 80];
    header_buf[..header.len()].copy_from_slice(header);
    writer.write_all(&header_buf)?;

    writer.write_all(&(mesh.indices.len() as u32).to_le_bytes())?;

    for [a, b, c] in &mesh.indices {
        let v0 = &mesh.vertices[*a as usize];
        let v1 = &mesh.vertices[*b as usize];
        let v2 = &mesh.vertices[*c as usize];

        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let n = e1.cross(&e2);
        let len = n.norm();
        let n = if len > 1e-15 {
            n / len
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        };

        write_f32(writer, n.x as f32)?;
        write_f32(writer, n.y as f32)?;
        write_f32(writer, n.z as f32)?;

        for v in [v0, v1, v2] {
            write_f32(writer, v.x as f32)?;
            write_f32(writer, v.y as f32)?;
            write_f32(writer, v.z as f32)?;
        }

        // Attribute byte count (unused).
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_f32<W: Write>(writer: &mut W, val: f32) -> io::Result<()> {
    writer.write_all(&val.to_le_bytes())
}
