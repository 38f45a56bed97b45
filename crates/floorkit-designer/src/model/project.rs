use std::collections::HashSet;

use floorkit_core::{DocumentError, ModelError, Units};
use tracing::debug;

use super::floor::DEFAULT_FLOOR_HEIGHT;
use super::{Floor, FloorId, Opening, OpeningId, OpeningKind, Wall, WallEnd, WallId};
use crate::geometry::{distance, Point, EPSILON};

/// The floorplan aggregate.
///
/// Holds every floor, wall and opening of a building plus the display unit
/// system and the active floor. All mutations go through methods that keep
/// the cross-references consistent: walls always live on an existing floor,
/// openings always sit on an existing wall and within its length, and at
/// least one floor exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    floors: Vec<Floor>,
    walls: Vec<Wall>,
    openings: Vec<Opening>,
    units: Units,
    active_floor_id: FloorId,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    /// A project with a single empty floor.
    pub fn new() -> Self {
        Self::with_floor_height(DEFAULT_FLOOR_HEIGHT)
    }

    pub fn with_floor_height(height: f64) -> Self {
        let floor = Floor::new("Level 1", 0.0, height.max(0.0));
        Self {
            active_floor_id: floor.id.clone(),
            floors: vec![floor],
            walls: Vec::new(),
            openings: Vec::new(),
            units: Units::default(),
        }
    }

    /// Assembles a project from raw parts, checking every invariant.
    pub fn from_parts(
        floors: Vec<Floor>,
        walls: Vec<Wall>,
        openings: Vec<Opening>,
        units: Units,
        active_floor_id: FloorId,
    ) -> Result<Self, DocumentError> {
        let project = Self {
            floors,
            walls,
            openings,
            units,
            active_floor_id,
        };
        project.validate()?;
        Ok(project)
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn active_floor_id(&self) -> &FloorId {
        &self.active_floor_id
    }

    pub fn active_floor(&self) -> Option<&Floor> {
        self.floor(&self.active_floor_id)
    }

    pub fn floor(&self, id: &FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| &f.id == id)
    }

    pub fn wall(&self, id: &WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| &w.id == id)
    }

    pub fn opening(&self, id: &OpeningId) -> Option<&Opening> {
        self.openings.iter().find(|o| &o.id == id)
    }

    pub fn walls_on_floor<'a>(&'a self, floor_id: &'a FloorId) -> impl Iterator<Item = &'a Wall> {
        self.walls.iter().filter(move |w| &w.floor_id == floor_id)
    }

    pub fn openings_on_wall<'a>(
        &'a self,
        wall_id: &'a WallId,
    ) -> impl Iterator<Item = &'a Opening> {
        self.openings.iter().filter(move |o| &o.wall_id == wall_id)
    }

    /// Openings hosted on any wall of the given floor.
    pub fn openings_on_floor<'a>(
        &'a self,
        floor_id: &'a FloorId,
    ) -> impl Iterator<Item = (&'a Wall, &'a Opening)> {
        self.walls_on_floor(floor_id)
            .flat_map(move |w| self.openings_on_wall(&w.id).map(move |o| (w, o)))
    }

    /// Sum of wall lengths on a floor.
    pub fn total_wall_length(&self, floor_id: &FloorId) -> f64 {
        self.walls_on_floor(floor_id).map(Wall::length).sum()
    }

    // ---- floors ----

    /// Appends a floor on top of the last one. The name defaults to
    /// `Level N`.
    pub fn add_floor(&mut self, name: Option<&str>, height: f64) -> Result<FloorId, ModelError> {
        if !height.is_finite() || height < 0.0 {
            return Err(ModelError::InvalidFloorHeight { height });
        }
        let elevation = self.floors.last().map(Floor::top).unwrap_or(0.0);
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Level {}", self.floors.len() + 1));
        let floor = Floor::new(name, elevation, height);
        let id = floor.id.clone();
        self.floors.push(floor);
        Ok(id)
    }

    /// Removes a floor with all of its walls and their openings.
    ///
    /// The last remaining floor cannot be removed. When the active floor is
    /// removed, its neighbour becomes active.
    pub fn remove_floor(&mut self, id: &FloorId) -> Result<(), ModelError> {
        let index = self
            .floors
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| ModelError::UnknownFloor { id: id.to_string() })?;
        if self.floors.len() == 1 {
            return Err(ModelError::LastFloor);
        }

        self.floors.remove(index);
        let doomed: HashSet<WallId> = self
            .walls
            .iter()
            .filter(|w| &w.floor_id == id)
            .map(|w| w.id.clone())
            .collect();
        self.walls.retain(|w| !doomed.contains(&w.id));
        self.openings.retain(|o| !doomed.contains(&o.wall_id));

        if &self.active_floor_id == id {
            let next = index.min(self.floors.len() - 1);
            self.active_floor_id = self.floors[next].id.clone();
        }
        debug!("Removed floor {} with {} walls", id, doomed.len());
        Ok(())
    }

    pub fn set_active_floor(&mut self, id: &FloorId) -> Result<(), ModelError> {
        if self.floor(id).is_none() {
            return Err(ModelError::UnknownFloor { id: id.to_string() });
        }
        self.active_floor_id = id.clone();
        Ok(())
    }

    pub fn rename_floor(&mut self, id: &FloorId, name: &str) -> Result<(), ModelError> {
        self.floor_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_floor_height(&mut self, id: &FloorId, height: f64) -> Result<(), ModelError> {
        if !height.is_finite() || height < 0.0 {
            return Err(ModelError::InvalidFloorHeight { height });
        }
        self.floor_mut(id)?.height = height;
        Ok(())
    }

    pub fn set_floor_elevation(&mut self, id: &FloorId, elevation: f64) -> Result<(), ModelError> {
        if !elevation.is_finite() {
            return Err(ModelError::InvalidFloorHeight { height: elevation });
        }
        self.floor_mut(id)?.elevation = elevation;
        Ok(())
    }

    fn floor_mut(&mut self, id: &FloorId) -> Result<&mut Floor, ModelError> {
        self.floors
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| ModelError::UnknownFloor { id: id.to_string() })
    }

    // ---- walls ----

    /// Adds a wall. Zero-length walls are rejected.
    pub fn add_wall(
        &mut self,
        a: Point,
        b: Point,
        thickness: f64,
        floor_id: &FloorId,
    ) -> Result<WallId, ModelError> {
        if self.floor(floor_id).is_none() {
            return Err(ModelError::UnknownFloor {
                id: floor_id.to_string(),
            });
        }
        check_thickness(thickness)?;
        check_endpoints(a, b)?;

        let wall = Wall::new(a, b, thickness, floor_id.clone());
        let id = wall.id.clone();
        self.walls.push(wall);
        Ok(id)
    }

    /// Removes a wall and every opening it hosts. Returns the ids of the
    /// removed openings.
    pub fn remove_wall(&mut self, id: &WallId) -> Result<Vec<OpeningId>, ModelError> {
        let index = self
            .walls
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| ModelError::UnknownWall { id: id.to_string() })?;
        self.walls.remove(index);

        let mut removed = Vec::new();
        self.openings.retain(|o| {
            if &o.wall_id == id {
                removed.push(o.id.clone());
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    pub fn set_wall_thickness(&mut self, id: &WallId, thickness: f64) -> Result<(), ModelError> {
        check_thickness(thickness)?;
        self.wall_mut(id)?.thickness = thickness;
        Ok(())
    }

    /// Moves both endpoints of a wall, rescaling its openings from the
    /// current state.
    pub fn set_wall_endpoints(&mut self, id: &WallId, a: Point, b: Point) -> Result<(), ModelError> {
        let wall = self
            .wall(id)
            .ok_or_else(|| ModelError::UnknownWall { id: id.to_string() })?;
        let from_length = wall.length();
        let baseline: Vec<Opening> = self.openings_on_wall(id).cloned().collect();
        self.reshape_wall(id, a, b, from_length, &baseline)
    }

    /// Moves one endpoint of a wall.
    pub fn move_wall_endpoint(
        &mut self,
        id: &WallId,
        end: WallEnd,
        p: Point,
    ) -> Result<(), ModelError> {
        let wall = self
            .wall(id)
            .ok_or_else(|| ModelError::UnknownWall { id: id.to_string() })?;
        let (a, b) = match end {
            WallEnd::A => (p, wall.b),
            WallEnd::B => (wall.a, p),
        };
        self.set_wall_endpoints(id, a, b)
    }

    /// Moves a wall without changing its length.
    pub fn translate_wall(&mut self, id: &WallId, dx: f64, dy: f64) -> Result<(), ModelError> {
        let wall = self.wall_mut(id)?;
        let delta = Point::new(dx, dy);
        wall.a = wall.a + delta;
        wall.b = wall.b + delta;
        Ok(())
    }

    /// Sets a wall's endpoints and recomputes its openings from a baseline.
    ///
    /// `baseline` holds the openings as they were when the wall had length
    /// `from_length`. Openings are looked up by id; ones that no longer exist
    /// are skipped. Used by drags so that rescaling does not accumulate over
    /// many pointer moves.
    pub(crate) fn reshape_wall(
        &mut self,
        id: &WallId,
        a: Point,
        b: Point,
        from_length: f64,
        baseline: &[Opening],
    ) -> Result<(), ModelError> {
        check_endpoints(a, b)?;
        let wall = self.wall_mut(id)?;
        wall.a = a;
        wall.b = b;
        let to_length = wall.length();

        for base in baseline.iter().filter(|o| &o.wall_id == id) {
            if let Some(op) = self.openings.iter_mut().find(|o| o.id == base.id) {
                op.offset = base.offset;
                op.width = base.width;
                op.rescale(from_length, to_length);
            }
        }
        Ok(())
    }

    fn wall_mut(&mut self, id: &WallId) -> Result<&mut Wall, ModelError> {
        self.walls
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| ModelError::UnknownWall { id: id.to_string() })
    }

    // ---- openings ----

    /// Adds an opening to a wall. The opening is clamped into the wall.
    pub fn add_opening(
        &mut self,
        wall_id: &WallId,
        kind: OpeningKind,
        offset: f64,
        width: f64,
        height: f64,
        sill: f64,
    ) -> Result<OpeningId, ModelError> {
        let length = self
            .wall(wall_id)
            .map(Wall::length)
            .ok_or_else(|| ModelError::UnknownWall {
                id: wall_id.to_string(),
            })?;
        check_opening(offset, width, height, sill)?;

        let mut opening = Opening::new(wall_id.clone(), kind, offset, width, height, sill);
        opening.clamp_to(length);
        let id = opening.id.clone();
        self.openings.push(opening);
        Ok(id)
    }

    pub fn remove_opening(&mut self, id: &OpeningId) -> Result<(), ModelError> {
        let index = self
            .openings
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| ModelError::UnknownOpening { id: id.to_string() })?;
        self.openings.remove(index);
        Ok(())
    }

    pub fn set_opening_offset(&mut self, id: &OpeningId, offset: f64) -> Result<(), ModelError> {
        if !offset.is_finite() {
            return Err(ModelError::InvalidOpening {
                reason: format!("offset {offset} is not finite"),
            });
        }
        self.update_opening(id, |op| op.offset = offset)
    }

    pub fn set_opening_width(&mut self, id: &OpeningId, width: f64) -> Result<(), ModelError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ModelError::InvalidOpening {
                reason: format!("width {width} must be positive"),
            });
        }
        self.update_opening(id, |op| op.width = width)
    }

    pub fn set_opening_height(&mut self, id: &OpeningId, height: f64) -> Result<(), ModelError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(ModelError::InvalidOpening {
                reason: format!("height {height} must be positive"),
            });
        }
        self.update_opening(id, |op| op.height = height)
    }

    pub fn set_opening_sill(&mut self, id: &OpeningId, sill: f64) -> Result<(), ModelError> {
        if !sill.is_finite() || sill < 0.0 {
            return Err(ModelError::InvalidOpening {
                reason: format!("sill {sill} must not be negative"),
            });
        }
        self.update_opening(id, |op| op.sill = sill)
    }

    fn update_opening(
        &mut self,
        id: &OpeningId,
        apply: impl FnOnce(&mut Opening),
    ) -> Result<(), ModelError> {
        let Some(index) = self.openings.iter().position(|o| &o.id == id) else {
            return Err(ModelError::UnknownOpening { id: id.to_string() });
        };
        let wall_id = self.openings[index].wall_id.clone();
        let length = self
            .wall(&wall_id)
            .map(Wall::length)
            .ok_or_else(|| ModelError::UnknownWall {
                id: wall_id.to_string(),
            })?;
        let op = &mut self.openings[index];
        apply(op);
        op.clamp_to(length);
        Ok(())
    }

    /// Checks every structural invariant of the aggregate.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.floors.is_empty() {
            return Err(DocumentError::invalid("project has no floors"));
        }

        let mut floor_ids = HashSet::new();
        for floor in &self.floors {
            if !floor_ids.insert(&floor.id) {
                return Err(DocumentError::invalid(format!("duplicate floor id {}", floor.id)));
            }
            if !floor.height.is_finite() || floor.height < 0.0 {
                return Err(DocumentError::invalid(format!(
                    "floor {} has invalid height {}",
                    floor.id, floor.height
                )));
            }
            if !floor.elevation.is_finite() {
                return Err(DocumentError::invalid(format!(
                    "floor {} has invalid elevation",
                    floor.id
                )));
            }
        }
        if !floor_ids.contains(&self.active_floor_id) {
            return Err(DocumentError::invalid(format!(
                "active floor {} does not exist",
                self.active_floor_id
            )));
        }

        let mut wall_ids = HashSet::new();
        for wall in &self.walls {
            if !wall_ids.insert(&wall.id) {
                return Err(DocumentError::invalid(format!("duplicate wall id {}", wall.id)));
            }
            if !floor_ids.contains(&wall.floor_id) {
                return Err(DocumentError::invalid(format!(
                    "wall {} references unknown floor {}",
                    wall.id, wall.floor_id
                )));
            }
            if !wall.a.is_finite() || !wall.b.is_finite() || wall.length() < EPSILON {
                return Err(DocumentError::invalid(format!("wall {} is degenerate", wall.id)));
            }
            if !wall.thickness.is_finite() || wall.thickness <= 0.0 {
                return Err(DocumentError::invalid(format!(
                    "wall {} has invalid thickness {}",
                    wall.id, wall.thickness
                )));
            }
        }

        let mut opening_ids = HashSet::new();
        for op in &self.openings {
            if !opening_ids.insert(&op.id) {
                return Err(DocumentError::invalid(format!("duplicate opening id {}", op.id)));
            }
            let Some(wall) = self.wall(&op.wall_id) else {
                return Err(DocumentError::invalid(format!(
                    "opening {} references unknown wall {}",
                    op.id, op.wall_id
                )));
            };
            if check_opening(op.offset, op.width, op.height, op.sill).is_err()
                || !op.fits(wall.length())
            {
                return Err(DocumentError::invalid(format!(
                    "opening {} does not fit wall {}",
                    op.id, wall.id
                )));
            }
        }
        Ok(())
    }
}

fn check_thickness(thickness: f64) -> Result<(), ModelError> {
    if thickness.is_finite() && thickness > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidThickness { thickness })
    }
}

fn check_endpoints(a: Point, b: Point) -> Result<(), ModelError> {
    if !a.is_finite() || !b.is_finite() || distance(a, b) < EPSILON {
        return Err(ModelError::ZeroLengthWall { x: a.x, y: a.y });
    }
    Ok(())
}

fn check_opening(offset: f64, width: f64, height: f64, sill: f64) -> Result<(), ModelError> {
    let reason = if !offset.is_finite() {
        "offset is not finite"
    } else if !width.is_finite() || width <= 0.0 {
        "width must be positive"
    } else if !height.is_finite() || height <= 0.0 {
        "height must be positive"
    } else if !sill.is_finite() || sill < 0.0 {
        "sill must not be negative"
    } else {
        return Ok(());
    };
    Err(ModelError::InvalidOpening {
        reason: reason.to_string(),
    })
}
