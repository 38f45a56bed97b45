//! # Floorkit Designer
//!
//! Parametric floorplan editing: a multi-floor model of walls with hosted
//! doors and windows, an interactive controller that turns pointer and
//! keyboard input into model edits, snapshot undo/redo, and exporters for
//! flat (SVG) and volumetric (glTF, GLB, STL) output.
//!
//! ## Architecture
//!
//! ```text
//! EditorState (interaction controller)
//!   ├── Project (floors, walls, openings)
//!   ├── History (snapshot undo/redo)
//!   ├── StageView (pan/zoom)
//!   └── Selection / Tool / Drag / WallDraft (transient)
//!
//! Export (stateless, reads a Project)
//!   ├── svg
//!   └── solid ── gltf, stl, preview
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_designer::{EditorState, Point, PointerEvent, Tool};
//!
//! let mut editor = EditorState::new();
//! editor.set_tool(Tool::DrawWall);
//! editor.pointer_down(&PointerEvent::primary(400.0, 300.0));
//! editor.pointer_down(&PointerEvent::primary(800.0, 300.0));
//! assert_eq!(editor.project().walls().len(), 1);
//! ```

pub mod editor_state;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod model;
pub mod selection;
pub mod serialization;
pub mod viewport;

pub use editor_state::{Drag, DragKind, EditorState, Tool, WallDraft};
pub use export::{
    build_preview_scene, export_glb, export_gltf, export_stl, export_svg, preview_html,
    PreviewScene, SolidOptions, SvgOptions,
};
pub use geometry::{snap_point, snap_value, Point};
pub use history::{History, ProjectSnapshot};
pub use input::{Key, KeyEvent, Modifiers, PointerButton, PointerEvent, WheelEvent};
pub use model::{
    Floor, FloorId, Opening, OpeningId, OpeningKind, Project, Wall, WallEnd, WallId,
};
pub use selection::{hit_test, Hit, Selection};
pub use serialization::{load_project, project_from_json, project_to_json, ProjectDocument};
pub use viewport::StageView;
