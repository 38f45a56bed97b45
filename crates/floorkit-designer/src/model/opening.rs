use serde::{Deserialize, Serialize};

use super::{OpeningId, WallId};
use crate::geometry::EPSILON;

/// Door or window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Built-in `(width, height, sill)` in feet.
    pub fn default_dimensions(self) -> (f64, f64, f64) {
        match self {
            OpeningKind::Door => (3.0, 6.75, 0.0),
            OpeningKind::Window => (4.0, 4.0, 3.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpeningKind::Door => "door",
            OpeningKind::Window => "window",
        }
    }
}

impl std::fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A door or window hosted on a wall.
///
/// `offset` is measured along the wall from its `a` endpoint; the opening
/// spans `[offset, offset + width]` of the wall length. `sill` and `height`
/// are vertical, measured from the floor's base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: OpeningId,
    pub wall_id: WallId,
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    pub sill: f64,
    #[serde(rename = "type")]
    pub kind: OpeningKind,
}

impl Opening {
    pub fn new(
        wall_id: WallId,
        kind: OpeningKind,
        offset: f64,
        width: f64,
        height: f64,
        sill: f64,
    ) -> Self {
        Self {
            id: OpeningId::generate(),
            wall_id,
            offset,
            width,
            height,
            sill,
            kind,
        }
    }

    pub fn end(&self) -> f64 {
        self.offset + self.width
    }

    /// Fits the opening into a wall of length `wall_length`: the width is
    /// capped at the wall length and the offset kept within `[0, len - width]`.
    pub fn clamp_to(&mut self, wall_length: f64) {
        let len = wall_length.max(0.0);
        self.width = self.width.min(len).max(0.0);
        self.offset = self.offset.min(len - self.width).max(0.0);
    }

    /// Scales the offset proportionally for a host wall that changed length
    /// from `from_length` to `to_length`, then clamps.
    pub fn rescale(&mut self, from_length: f64, to_length: f64) {
        if from_length > EPSILON {
            self.offset *= to_length / from_length;
        }
        self.clamp_to(to_length);
    }

    /// Whether the opening lies within a wall of the given length.
    pub fn fits(&self, wall_length: f64) -> bool {
        const TOLERANCE: f64 = 1e-6;
        self.offset >= -TOLERANCE && self.end() <= wall_length + TOLERANCE
    }
}
