//! Tool modes and input dispatch.

use std::fmt;

use floorkit_core::EditorEvent;
use tracing::{debug, warn};

use super::EditorState;
use crate::geometry::{snap_value, Point};
use crate::input::{Key, KeyEvent, Modifiers, PointerEvent, WheelEvent};
use crate::model::OpeningKind;
use crate::selection::{closest_wall, hit_test, Hit, Selection};

/// Editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Select,
    DrawWall,
    PlaceDoor,
    PlaceWindow,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::DrawWall => "draw-wall",
            Tool::PlaceDoor => "place-door",
            Tool::PlaceWindow => "place-window",
        }
    }

    /// Maps a toolbar index to a tool; unknown indices fall back to select.
    pub fn from_index(index: i32) -> Tool {
        match index {
            0 => Tool::Select,
            1 => Tool::DrawWall,
            2 => Tool::PlaceDoor,
            3 => Tool::PlaceWindow,
            unknown => {
                warn!("Unknown tool index {}, defaulting to Select", unknown);
                Tool::Select
            }
        }
    }

    /// Single-key shortcut.
    pub fn from_shortcut(c: char) -> Option<Tool> {
        match c.to_ascii_lowercase() {
            'v' => Some(Tool::Select),
            'w' => Some(Tool::DrawWall),
            'd' => Some(Tool::PlaceDoor),
            'n' => Some(Tool::PlaceWindow),
            _ => None,
        }
    }

    fn opening_kind(self) -> Option<OpeningKind> {
        match self {
            Tool::PlaceDoor => Some(OpeningKind::Door),
            Tool::PlaceWindow => Some(OpeningKind::Window),
            Tool::Select | Tool::DrawWall => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wall being drawn: the first click and the pointer-following end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDraft {
    pub start: Point,
    pub end: Point,
}

impl EditorState {
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        self.cancel_draft();
        self.tool = tool;
        debug!("Tool changed to {}", tool);
        self.emit(EditorEvent::ToolChanged {
            tool: tool.as_str().to_string(),
        });
    }

    /// Sets the tool from a toolbar index.
    pub fn set_tool_index(&mut self, index: i32) {
        self.set_tool(Tool::from_index(index));
    }

    pub fn pointer_down(&mut self, ev: &PointerEvent) {
        if self.drag.is_some() {
            debug!("Pointer down during an active drag ignored");
            return;
        }
        if ev.is_pan_gesture() {
            self.start_pan(ev);
            return;
        }

        let p = self.view.screen_to_model(ev.x, ev.y);
        match self.tool {
            Tool::Select => self.press_select(p),
            Tool::DrawWall => self.click_draw_wall(p),
            Tool::PlaceDoor | Tool::PlaceWindow => {
                if let Some(kind) = self.tool.opening_kind() {
                    self.click_place_opening(p, kind);
                }
            }
        }
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) {
        if self.drag.is_some() {
            self.update_drag(ev);
            return;
        }
        if self.tool != Tool::DrawWall || self.draft.is_none() {
            return;
        }
        let end = self.snap(self.view.screen_to_model(ev.x, ev.y));
        if let Some(draft) = self.draft.as_mut() {
            if draft.end != end {
                draft.end = end;
                self.emit(EditorEvent::DraftChanged);
            }
        }
    }

    pub fn pointer_up(&mut self, _ev: &PointerEvent) {
        self.finish_drag();
    }

    /// Zooms around the cursor. Returns whether the view changed.
    pub fn wheel(&mut self, ev: &WheelEvent) -> bool {
        let changed = self.view.wheel_zoom(ev.x, ev.y, ev.delta_y);
        if changed {
            self.notify_view();
        }
        changed
    }

    /// Handles a key press. Returns whether the key was consumed.
    pub fn key_down(&mut self, ev: &KeyEvent) -> bool {
        match &ev.key {
            Key::Escape => {
                if !self.cancel_gesture() {
                    self.clear_selection();
                }
                true
            }
            Key::Delete | Key::Backspace => self.delete_selection(),
            Key::Char(c) if ev.modifiers.command() => match c.to_ascii_lowercase() {
                'z' if ev.modifiers.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                _ => false,
            },
            Key::Char(c) if !ev.modifiers.any() || ev.modifiers == shift_only() => {
                match Tool::from_shortcut(*c) {
                    Some(tool) => {
                        self.set_tool(tool);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Cancels a wall draft or an active drag. Returns whether anything was
    /// cancelled.
    pub fn cancel_gesture(&mut self) -> bool {
        let draft = self.cancel_draft();
        let drag = self.cancel_drag();
        draft || drag
    }

    fn cancel_draft(&mut self) -> bool {
        if self.draft.take().is_some() {
            self.emit(EditorEvent::DraftChanged);
            true
        } else {
            false
        }
    }

    fn press_select(&mut self, p: Point) {
        let floor_id = self.active_floor_id();
        let Some(hit) = hit_test(&self.project, &floor_id, p, self.min_hit_radius()) else {
            self.set_selection(Selection::None);
            return;
        };
        self.set_selection(hit.to_selection());

        let grab = self.snap(p);
        match hit {
            Hit::WallEndpoint(wall_id, end) => self.start_wall_drag(&wall_id, Some(end), grab),
            Hit::WallBody(wall_id) => self.start_wall_drag(&wall_id, None, grab),
            Hit::Opening(_) => {}
        }
    }

    fn click_draw_wall(&mut self, p: Point) {
        let p = self.snap(p);
        match self.draft.take() {
            None => {
                self.draft = Some(WallDraft { start: p, end: p });
            }
            Some(draft) => {
                if draft.start == p {
                    debug!("Wall draft ended on its start point; discarded");
                } else {
                    let floor_id = self.active_floor_id();
                    let thickness = self.config.defaults.wall_thickness;
                    self.apply("add wall", |project| {
                        project.add_wall(draft.start, p, thickness, &floor_id)
                    });
                }
            }
        }
        self.emit(EditorEvent::DraftChanged);
    }

    fn click_place_opening(&mut self, p: Point, kind: OpeningKind) {
        let floor_id = self.active_floor_id();
        let units = self.project.units();
        let Some((wall, proj)) = closest_wall(&self.project, &floor_id, p, self.min_hit_radius())
        else {
            debug!("No wall under cursor for {}", kind);
            return;
        };
        let wall_id = wall.id.clone();
        let offset = snap_value(proj.t * wall.length(), units);
        if let Some(id) = self.add_opening(&wall_id, kind, offset) {
            self.set_selection(Selection::Opening(id));
        }
    }
}

fn shift_only() -> Modifiers {
    Modifiers {
        shift: true,
        ..Modifiers::NONE
    }
}
