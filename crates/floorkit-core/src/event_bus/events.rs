//! Event type definitions for the editor event bus.
//!
//! Events carry ids and small values only; subscribers read the full state
//! back from the editor that published them.

use serde::{Deserialize, Serialize};

/// Change notification published by an editor instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// The project model changed (committed or live drag update)
    ProjectChanged {
        /// `true` while a drag gesture is still uncommitted.
        live: bool,
    },
    /// The project was replaced wholesale (import, load, undo, redo, cancelled drag)
    ProjectReplaced,
    /// The selection changed; `None` means nothing is selected
    SelectionChanged {
        /// Selected element kind (`"wall"` or `"opening"`).
        kind: Option<String>,
        /// Selected element id.
        id: Option<String>,
    },
    /// The active tool changed
    ToolChanged {
        /// New tool name.
        tool: String,
    },
    /// The active floor changed
    ActiveFloorChanged {
        /// New active floor id.
        floor_id: String,
    },
    /// Pan or zoom of the stage view changed
    ViewChanged {
        /// Pan offset in pixels.
        pan_x: f64,
        /// Pan offset in pixels.
        pan_y: f64,
        /// Pixels per model unit.
        scale: f64,
    },
    /// Undo/redo availability changed
    HistoryChanged {
        /// Whether an undo step exists.
        can_undo: bool,
        /// Whether a redo step exists.
        can_redo: bool,
    },
    /// The wall draft preview moved or was cleared
    DraftChanged,
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::ProjectChanged { .. } | EditorEvent::ProjectReplaced => {
                EventCategory::Project
            }
            EditorEvent::SelectionChanged { .. } => EventCategory::Selection,
            EditorEvent::ToolChanged { .. } | EditorEvent::DraftChanged => EventCategory::Tool,
            EditorEvent::ActiveFloorChanged { .. } => EventCategory::Project,
            EditorEvent::ViewChanged { .. } => EventCategory::View,
            EditorEvent::HistoryChanged { .. } => EventCategory::History,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::ProjectChanged { live: true } => "Project updated (live)".to_string(),
            EditorEvent::ProjectChanged { live: false } => "Project updated".to_string(),
            EditorEvent::ProjectReplaced => "Project replaced".to_string(),
            EditorEvent::SelectionChanged { kind, id } => match (kind, id) {
                (Some(kind), Some(id)) => format!("Selected {} {}", kind, id),
                _ => "Selection cleared".to_string(),
            },
            EditorEvent::ToolChanged { tool } => format!("Tool: {}", tool),
            EditorEvent::ActiveFloorChanged { floor_id } => format!("Active floor: {}", floor_id),
            EditorEvent::ViewChanged { scale, .. } => format!("View changed (scale {:.2})", scale),
            EditorEvent::HistoryChanged { can_undo, can_redo } => {
                format!("History: undo={} redo={}", can_undo, can_redo)
            }
            EditorEvent::DraftChanged => "Wall draft changed".to_string(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Model mutations and replacements
    Project,
    /// Selection changes
    Selection,
    /// Tool mode and draft preview
    Tool,
    /// Viewport pan/zoom
    View,
    /// Undo/redo availability
    History,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventCategory::Project => "project",
            EventCategory::Selection => "selection",
            EventCategory::Tool => "tool",
            EventCategory::View => "view",
            EventCategory::History => "history",
        };
        f.write_str(name)
    }
}
