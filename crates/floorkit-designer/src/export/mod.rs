//! Export pipeline.
//!
//! Stateless transforms from a [`Project`](crate::model::Project) to external
//! artifacts:
//! - `svg`: flat vector drawing of one floor
//! - `solid`: pure profile-with-holes extrusion shared by every 3D target
//! - `gltf`: volumetric scene as glTF JSON or GLB
//! - `stl`: volumetric scene as binary STL
//! - `preview`: browser preview built from the same wall solids
//!
//! Exporters never mutate the project.

pub mod gltf;
pub mod preview;
pub mod solid;
pub mod stl;
pub mod svg;

pub use gltf::{export_glb, export_gltf};
pub use preview::{build_preview_scene, preview_html, PreviewLight, PreviewMesh, PreviewScene};
pub use solid::{
    extrude_profile, wall_profile, wall_solid, wall_solids, Profile2D, SolidOptions, Triangle3D,
    WallSolid,
};
pub use stl::export_stl;
pub use svg::{export_svg, SvgOptions};
