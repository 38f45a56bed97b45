//! Live 3D preview.
//!
//! [`PreviewScene`] holds GPU-ready buffers for an on-screen renderer and is
//! rebuilt from the same wall solids the file exporters use, so the preview
//! and the exported scene never disagree. [`preview_html`] wraps the glTF
//! export in a standalone page for browser display.

use floorkit_core::ExportError;
use serde::Serialize;
use tracing::debug;

use super::gltf::{export_gltf, light_rig, AMBIENT_COLOR, AMBIENT_INTENSITY, WALL_COLOR};
use super::solid::{wall_solids, SolidOptions};
use crate::model::{Project, WallId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMesh {
    pub wall_id: WallId,
    pub name: String,
    /// Flat `x, y, z` triples, three vertices per triangle.
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub color: [f32; 4],
}

impl PreviewMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLight {
    pub name: String,
    /// Unit vector the light travels along.
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewScene {
    pub meshes: Vec<PreviewMesh>,
    pub lights: Vec<PreviewLight>,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

impl PreviewScene {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count() / 3).sum()
    }
}

pub fn build_preview_scene(
    project: &Project,
    options: &SolidOptions,
) -> Result<PreviewScene, ExportError> {
    let meshes: Vec<PreviewMesh> = wall_solids(project, options)?
        .into_iter()
        .map(|solid| {
            let mut positions = Vec::with_capacity(solid.triangles.len() * 9);
            let mut normals = Vec::with_capacity(solid.triangles.len() * 9);
            for t in &solid.triangles {
                for v in &t.vertices {
                    positions.extend_from_slice(&[v.x, v.y, v.z]);
                    normals.extend_from_slice(&[t.normal.x, t.normal.y, t.normal.z]);
                }
            }
            PreviewMesh {
                wall_id: solid.wall_id,
                name: solid.name,
                positions,
                normals,
                color: WALL_COLOR,
            }
        })
        .collect();

    let lights = light_rig()
        .iter()
        .map(|l| {
            let q = nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
                l.rotation[3],
                l.rotation[0],
                l.rotation[1],
                l.rotation[2],
            ));
            let d = q * nalgebra::Vector3::new(0.0, 0.0, -1.0);
            PreviewLight {
                name: l.name.to_string(),
                direction: [d.x, d.y, d.z],
                color: l.color,
                intensity: l.intensity,
            }
        })
        .collect();

    let scene = PreviewScene {
        meshes,
        lights,
        ambient_color: AMBIENT_COLOR,
        ambient_intensity: AMBIENT_INTENSITY,
    };
    debug!(
        "Built preview scene: {} meshes, {} triangles",
        scene.meshes.len(),
        scene.triangle_count()
    );
    Ok(scene)
}

/// A standalone HTML page showing the glTF export with `<model-viewer>`.
pub fn preview_html(
    project: &Project,
    options: &SolidOptions,
    title: &str,
) -> Result<String, ExportError> {
    use base64::Engine;

    let gltf = export_gltf(project, options)?;
    let src = format!(
        "data:model/gltf+json;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(gltf.as_bytes())
    );
    let title = title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script type="module" src="https://ajax.googleapis.com/ajax/libs/model-viewer/3.5.0/model-viewer.min.js"></script>
<style>html, body {{ margin: 0; height: 100%; background: #f4f4f2; }} model-viewer {{ width: 100%; height: 100%; }}</style>
</head>
<body>
<model-viewer src="{src}" alt="{title}" camera-controls shadow-intensity="0.6" exposure="1.0"></model-viewer>
</body>
</html>
"#
    ))
}
