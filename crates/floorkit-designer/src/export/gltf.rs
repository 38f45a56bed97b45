//! glTF 2.0 volumetric export.
//!
//! One node and mesh per wall, a single wall material, and a lighting rig of
//! two `KHR_lights_punctual` directional lights plus an ambient term stored
//! in the scene extras. Geometry is written unindexed with per-face normals.

use base64::Engine;
use floorkit_core::ExportError;
use nalgebra::UnitQuaternion;
use serde_json::{json, Value};
use std::f32::consts::PI;
use tracing::info;

use super::solid::{wall_solids, SolidOptions, WallSolid};
use crate::model::Project;

const ARRAY_BUFFER: u32 = 34962;
const FLOAT: u32 = 5126;
const TRIANGLES: u32 = 4;

const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

pub(crate) const WALL_COLOR: [f32; 4] = [0.86, 0.85, 0.82, 1.0];
pub(crate) const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub(crate) const AMBIENT_INTENSITY: f32 = 0.4;

/// A directional light of the preview rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DirectionalLight {
    pub name: &'static str,
    pub color: [f32; 3],
    pub intensity: f32,
    /// Node rotation as `[x, y, z, w]`; the light shines along local -Z.
    pub rotation: [f32; 4],
}

pub(crate) fn light_rig() -> [DirectionalLight; 2] {
    let rotation = |roll: f32, pitch: f32, yaw: f32| {
        let q = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        let c = q.coords;
        [c.x, c.y, c.z, c.w]
    };
    [
        DirectionalLight {
            name: "key",
            color: [1.0, 0.98, 0.94],
            intensity: 2.5,
            rotation: rotation(-PI / 4.0, PI / 4.0, 0.0),
        },
        DirectionalLight {
            name: "fill",
            color: [0.85, 0.9, 1.0],
            intensity: 1.0,
            rotation: rotation(-PI / 3.0, -3.0 * PI / 4.0, 0.0),
        },
    ]
}

/// Glues per-wall geometry into one binary buffer and its glTF description.
struct SceneBuilder {
    bin: Vec<u8>,
    buffer_views: Vec<Value>,
    accessors: Vec<Value>,
    meshes: Vec<Value>,
    nodes: Vec<Value>,
}

impl SceneBuilder {
    fn new() -> Self {
        Self {
            bin: Vec::new(),
            buffer_views: Vec::new(),
            accessors: Vec::new(),
            meshes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Appends a VEC3 float attribute and returns its accessor index.
    fn push_vec3(&mut self, values: &[[f32; 3]], with_bounds: bool) -> usize {
        let offset = self.bin.len();
        for v in values {
            for c in v {
                self.bin.extend_from_slice(&c.to_le_bytes());
            }
        }
        let view = self.buffer_views.len();
        self.buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": values.len() * 12,
            "target": ARRAY_BUFFER,
        }));

        let mut accessor = json!({
            "bufferView": view,
            "componentType": FLOAT,
            "count": values.len(),
            "type": "VEC3",
        });
        if with_bounds {
            let mut min = [f32::INFINITY; 3];
            let mut max = [f32::NEG_INFINITY; 3];
            for v in values {
                for i in 0..3 {
                    min[i] = min[i].min(v[i]);
                    max[i] = max[i].max(v[i]);
                }
            }
            accessor["min"] = json!(min);
            accessor["max"] = json!(max);
        }
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    fn add_solid(&mut self, solid: &WallSolid) {
        if solid.triangles.is_empty() {
            return;
        }
        let positions: Vec<[f32; 3]> = solid
            .triangles
            .iter()
            .flat_map(|t| t.vertices.map(|v| [v.x, v.y, v.z]))
            .collect();
        let normals: Vec<[f32; 3]> = solid
            .triangles
            .iter()
            .flat_map(|t| [[t.normal.x, t.normal.y, t.normal.z]; 3])
            .collect();

        let position = self.push_vec3(&positions, true);
        let normal = self.push_vec3(&normals, false);
        let mesh = self.meshes.len();
        self.meshes.push(json!({
            "name": solid.name,
            "primitives": [{
                "attributes": { "POSITION": position, "NORMAL": normal },
                "material": 0,
                "mode": TRIANGLES,
            }],
        }));
        self.nodes.push(json!({ "name": solid.name, "mesh": mesh }));
    }

    /// Finishes the document. `uri` is set on the buffer for embedded
    /// glTF and omitted for GLB.
    fn finish(mut self, uri: Option<String>) -> (Value, Vec<u8>) {
        let lights = light_rig();
        let first_light_node = self.nodes.len();
        for (i, light) in lights.iter().enumerate() {
            self.nodes.push(json!({
                "name": format!("light-{}", light.name),
                "rotation": light.rotation,
                "extensions": { "KHR_lights_punctual": { "light": i } },
            }));
        }
        let light_defs: Vec<Value> = lights
            .iter()
            .map(|l| {
                json!({
                    "name": l.name,
                    "type": "directional",
                    "color": l.color,
                    "intensity": l.intensity,
                })
            })
            .collect();

        let node_indices: Vec<usize> = (0..self.nodes.len()).collect();
        let mut doc = json!({
            "asset": {
                "version": "2.0",
                "generator": concat!("floorkit ", env!("CARGO_PKG_VERSION")),
            },
            "extensionsUsed": ["KHR_lights_punctual"],
            "extensions": { "KHR_lights_punctual": { "lights": light_defs } },
            "scene": 0,
            "scenes": [{
                "name": "floorplan",
                "nodes": node_indices,
                "extras": {
                    "ambientLight": { "color": AMBIENT_COLOR, "intensity": AMBIENT_INTENSITY },
                    "lightNodes": [first_light_node, first_light_node + 1],
                },
            }],
            "nodes": self.nodes,
            "materials": [{
                "name": "wall",
                "pbrMetallicRoughness": {
                    "baseColorFactor": WALL_COLOR,
                    "metallicFactor": 0.0,
                    "roughnessFactor": 0.9,
                },
            }],
        });

        if !self.meshes.is_empty() {
            let mut buffer = json!({ "byteLength": self.bin.len() });
            if let Some(uri) = uri {
                buffer["uri"] = Value::String(uri);
            }
            doc["buffers"] = json!([buffer]);
            doc["bufferViews"] = Value::Array(self.buffer_views);
            doc["accessors"] = Value::Array(self.accessors);
            doc["meshes"] = Value::Array(self.meshes);
        }
        (doc, self.bin)
    }
}

fn build(project: &Project, options: &SolidOptions) -> Result<SceneBuilder, ExportError> {
    let mut builder = SceneBuilder::new();
    for solid in wall_solids(project, options)? {
        builder.add_solid(&solid);
    }
    Ok(builder)
}

fn encoding_error(e: serde_json::Error) -> ExportError {
    ExportError::Encoding {
        reason: e.to_string(),
    }
}

/// Exports every floor as a self-contained glTF JSON document with an
/// embedded base64 buffer.
pub fn export_gltf(project: &Project, options: &SolidOptions) -> Result<String, ExportError> {
    let builder = build(project, options)?;
    let uri = format!(
        "data:application/octet-stream;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&builder.bin)
    );
    let (doc, _) = builder.finish(Some(uri));
    let text = serde_json::to_string(&doc).map_err(encoding_error)?;
    info!("Exported glTF document ({} bytes)", text.len());
    Ok(text)
}

/// Exports every floor as a binary GLB container.
pub fn export_glb(project: &Project, options: &SolidOptions) -> Result<Vec<u8>, ExportError> {
    let (doc, mut bin) = build(project, options)?.finish(None);
    let mut json = serde_json::to_vec(&doc).map_err(encoding_error)?;
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let has_bin = !bin.is_empty();
    let mut total = 12 + 8 + json.len();
    if has_bin {
        total += 8 + bin.len();
    }
    let total = u32::try_from(total).map_err(|_| ExportError::Encoding {
        reason: "GLB exceeds 4 GiB".to_string(),
    })?;

    let mut out = Vec::with_capacity(total as usize);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&total.to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);
    if has_bin {
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&bin);
    }
    info!("Exported GLB container ({} bytes)", out.len());
    Ok(out)
}
