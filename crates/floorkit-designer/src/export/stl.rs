//! Binary STL export of every wall solid.
//!
//! STL consumers expect Z up, so the Y-up scene is rotated back into plan
//! coordinates: plan X stays X, plan Y becomes Y and height becomes Z.

use floorkit_core::ExportError;
use nalgebra::{Point3, Vector3};
use tracing::info;

use super::solid::{wall_solids, SolidOptions};
use crate::model::Project;

fn z_up(v: Vector3<f32>) -> [f32; 3] {
    [v.x, -v.z, v.y]
}

fn to_stl(vertices: &[Point3<f32>; 3], normal: &Vector3<f32>) -> stl_io::Triangle {
    stl_io::Triangle {
        normal: stl_io::Normal::new(z_up(*normal)),
        vertices: vertices.map(|v| stl_io::Vertex::new(z_up(v.coords))),
    }
}

/// Writes all floors as one binary STL mesh.
pub fn export_stl(project: &Project, options: &SolidOptions) -> Result<Vec<u8>, ExportError> {
    let triangles: Vec<stl_io::Triangle> = wall_solids(project, options)?
        .iter()
        .flat_map(|solid| solid.triangles.iter())
        .map(|t| to_stl(&t.vertices, &t.normal))
        .collect();

    let mut out = Vec::with_capacity(84 + triangles.len() * 50);
    stl_io::write_stl(&mut out, triangles.iter()).map_err(|e| ExportError::Encoding {
        reason: e.to_string(),
    })?;
    info!("Exported STL with {} triangles", triangles.len());
    Ok(out)
}
