use serde::{Deserialize, Serialize};

use super::FloorId;

/// Default storey height in feet.
pub const DEFAULT_FLOOR_HEIGHT: f64 = 10.0;

/// A storey of the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    /// Height of the floor's base above the ground plane.
    pub elevation: f64,
    /// Storey height; walls on this floor are extruded to it.
    pub height: f64,
}

impl Floor {
    pub fn new(name: impl Into<String>, elevation: f64, height: f64) -> Self {
        Self {
            id: FloorId::generate(),
            name: name.into(),
            elevation,
            height,
        }
    }

    /// Elevation of the top of this floor, where the next one starts.
    pub fn top(&self) -> f64 {
        self.elevation + self.height
    }
}
