use serde::{Deserialize, Serialize};

use super::{FloorId, WallId};
use crate::geometry::{distance, Point};

/// Which endpoint of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallEnd {
    A,
    B,
}

/// A straight wall segment with thickness on one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: WallId,
    pub a: Point,
    pub b: Point,
    pub thickness: f64,
    pub floor_id: FloorId,
}

impl Wall {
    pub fn new(a: Point, b: Point, thickness: f64, floor_id: FloorId) -> Self {
        Self {
            id: WallId::generate(),
            a,
            b,
            thickness,
            floor_id,
        }
    }

    pub fn length(&self) -> f64 {
        distance(self.a, self.b)
    }

    pub fn endpoint(&self, end: WallEnd) -> Point {
        match end {
            WallEnd::A => self.a,
            WallEnd::B => self.b,
        }
    }

    pub fn set_endpoint(&mut self, end: WallEnd, p: Point) {
        match end {
            WallEnd::A => self.a = p,
            WallEnd::B => self.b = p,
        }
    }
}
