//! History-recorded project mutations.
//!
//! Each command is one undo step. Rejected mutations (invalid geometry,
//! missing ids) leave the project untouched and return `None`/`false`.

use floorkit_core::{EditorEvent, Units};
use tracing::debug;

use super::EditorState;
use crate::geometry::Point;
use crate::model::{FloorId, OpeningId, OpeningKind, WallId};
use crate::selection::Selection;

impl EditorState {
    /// Adds a wall on the active floor. Endpoints are snapped first.
    pub fn add_wall(&mut self, a: Point, b: Point) -> Option<WallId> {
        let (a, b) = (self.snap(a), self.snap(b));
        let floor_id = self.active_floor_id();
        let thickness = self.config.defaults.wall_thickness;
        self.apply("add wall", |project| project.add_wall(a, b, thickness, &floor_id))
    }

    /// Adds a door or window with the configured default dimensions.
    pub fn add_opening(
        &mut self,
        wall_id: &WallId,
        kind: OpeningKind,
        offset: f64,
    ) -> Option<OpeningId> {
        let d = &self.config.defaults;
        let (width, height, sill) = match kind {
            OpeningKind::Door => (d.door_width, d.door_height, d.door_sill),
            OpeningKind::Window => (d.window_width, d.window_height, d.window_sill),
        };
        self.apply("add opening", |project| {
            project.add_opening(wall_id, kind, offset, width, height, sill)
        })
    }

    /// Deletes the selected wall (with its openings) or opening.
    pub fn delete_selection(&mut self) -> bool {
        let removed = match self.selection.clone() {
            Selection::None => return false,
            Selection::Wall(id) => {
                match self.apply("delete wall", |project| project.remove_wall(&id)) {
                    Some(openings) => {
                        debug!("Deleted wall {} and {} openings", id, openings.len());
                        true
                    }
                    None => false,
                }
            }
            Selection::Opening(id) => self
                .apply("delete opening", |project| project.remove_opening(&id))
                .is_some(),
        };
        self.set_selection(Selection::None);
        removed
    }

    pub fn remove_wall(&mut self, id: &WallId) -> bool {
        let removed = self
            .apply("remove wall", |project| project.remove_wall(id))
            .is_some();
        if removed && !self.selection.exists_in(&self.project) {
            self.set_selection(Selection::None);
        }
        removed
    }

    pub fn remove_opening(&mut self, id: &OpeningId) -> bool {
        let removed = self
            .apply("remove opening", |project| project.remove_opening(id))
            .is_some();
        if removed && !self.selection.exists_in(&self.project) {
            self.set_selection(Selection::None);
        }
        removed
    }

    pub fn set_wall_thickness(&mut self, id: &WallId, thickness: f64) -> bool {
        self.apply("set wall thickness", |project| {
            project.set_wall_thickness(id, thickness)
        })
        .is_some()
    }

    /// Moves a wall's endpoints (snapped), rescaling its openings.
    pub fn set_wall_endpoints(&mut self, id: &WallId, a: Point, b: Point) -> bool {
        let (a, b) = (self.snap(a), self.snap(b));
        self.apply("move wall", |project| project.set_wall_endpoints(id, a, b))
            .is_some()
    }

    pub fn set_opening_offset(&mut self, id: &OpeningId, offset: f64) -> bool {
        self.apply("set opening offset", |project| {
            project.set_opening_offset(id, offset)
        })
        .is_some()
    }

    pub fn set_opening_width(&mut self, id: &OpeningId, width: f64) -> bool {
        self.apply("set opening width", |project| project.set_opening_width(id, width))
            .is_some()
    }

    pub fn set_opening_height(&mut self, id: &OpeningId, height: f64) -> bool {
        self.apply("set opening height", |project| {
            project.set_opening_height(id, height)
        })
        .is_some()
    }

    pub fn set_opening_sill(&mut self, id: &OpeningId, sill: f64) -> bool {
        self.apply("set opening sill", |project| project.set_opening_sill(id, sill))
            .is_some()
    }

    /// Adds a floor on top of the stack and makes it active.
    pub fn add_floor(&mut self, name: Option<&str>) -> Option<FloorId> {
        let height = self.config.defaults.floor_height;
        let id = self.apply("add floor", |project| {
            let id = project.add_floor(name, height)?;
            project.set_active_floor(&id)?;
            Ok(id)
        })?;
        self.after_floor_switch();
        Some(id)
    }

    /// Removes a floor and everything on it. The last floor is kept.
    pub fn remove_floor(&mut self, id: &FloorId) -> bool {
        let active_before = self.active_floor_id();
        let removed = self
            .apply("remove floor", |project| project.remove_floor(id))
            .is_some();
        if removed {
            if !self.selection.exists_in(&self.project) {
                self.set_selection(Selection::None);
            }
            if self.active_floor_id() != active_before {
                self.after_floor_switch();
            }
        }
        removed
    }

    pub fn rename_floor(&mut self, id: &FloorId, name: &str) -> bool {
        self.apply("rename floor", |project| project.rename_floor(id, name))
            .is_some()
    }

    pub fn set_floor_height(&mut self, id: &FloorId, height: f64) -> bool {
        self.apply("set floor height", |project| {
            project.set_floor_height(id, height)
        })
        .is_some()
    }

    pub fn set_floor_elevation(&mut self, id: &FloorId, elevation: f64) -> bool {
        self.apply("set floor elevation", |project| {
            project.set_floor_elevation(id, elevation)
        })
        .is_some()
    }

    /// Switches the floor being edited. Navigation only; not an undo step.
    pub fn set_active_floor(&mut self, id: &FloorId) -> bool {
        if self.project.active_floor_id() == id {
            return true;
        }
        match self.project.set_active_floor(id) {
            Ok(()) => {
                self.after_floor_switch();
                true
            }
            Err(e) => {
                debug!("set active floor rejected: {}", e);
                false
            }
        }
    }

    pub fn set_units(&mut self, units: Units) -> bool {
        self.apply("set units", |project| {
            project.set_units(units);
            Ok(())
        })
        .is_some()
    }

    pub fn toggle_units(&mut self) -> bool {
        self.set_units(self.project.units().toggled())
    }

    fn after_floor_switch(&mut self) {
        self.cancel_gesture();
        self.set_selection(Selection::None);
        self.emit(EditorEvent::ActiveFloorChanged {
            floor_id: self.project.active_floor_id().to_string(),
        });
    }
}
