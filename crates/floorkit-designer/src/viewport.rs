//! Stage view: pan and zoom of the plan canvas.
//!
//! Converts between screen pixels (origin top-left, Y down) and model
//! coordinates (feet, Y up). The view is transient editor state and never
//! part of the project or its history.

use std::fmt;

use crate::geometry::{bounds_of, Point};

/// Default scale in pixels per model unit.
pub const DEFAULT_SCALE: f64 = 40.0;
pub const DEFAULT_MIN_SCALE: f64 = 2.0;
pub const DEFAULT_MAX_SCALE: f64 = 400.0;
/// Multiplicative zoom per wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

/// Pan offset and scale of the plan canvas.
///
/// ```text
/// screen_x = x * scale + pan.x
/// screen_y = pan.y - y * scale
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pan: Point,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
}

impl Default for StageView {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE, DEFAULT_ZOOM_STEP)
    }
}

impl StageView {
    /// Creates a view centred on an 800x600 canvas at the default scale.
    pub fn new(min_scale: f64, max_scale: f64, zoom_step: f64) -> Self {
        let (min_scale, max_scale) = if min_scale > 0.0 && min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
        };
        Self {
            pan: Point::new(400.0, 300.0),
            scale: DEFAULT_SCALE.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            zoom_step: zoom_step.max(1.0 + f64::EPSILON),
        }
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Point::new(x, y);
    }

    /// Shifts the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = Point::new(self.pan.x + dx, self.pan.y + dy);
    }

    /// Sets the scale, limited to the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
    }

    pub fn screen_to_model(&self, sx: f64, sy: f64) -> Point {
        Point::new((sx - self.pan.x) / self.scale, (self.pan.y - sy) / self.scale)
    }

    pub fn model_to_screen(&self, p: Point) -> (f64, f64) {
        (p.x * self.scale + self.pan.x, self.pan.y - p.y * self.scale)
    }

    /// Converts a screen distance to model units.
    pub fn pixels_to_model(&self, px: f64) -> f64 {
        px / self.scale
    }

    /// Zooms by `factor` keeping the model point under `(sx, sy)` in place.
    /// Returns `false` when the scale did not change.
    pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) -> bool {
        let anchor = self.screen_to_model(sx, sy);
        let old = self.scale;
        self.set_scale(old * factor);
        if (self.scale - old).abs() < f64::EPSILON {
            return false;
        }
        self.pan = Point::new(sx - anchor.x * self.scale, sy + anchor.y * self.scale);
        true
    }

    /// Applies a wheel delta: negative zooms in, positive zooms out.
    pub fn wheel_zoom(&mut self, sx: f64, sy: f64, delta_y: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        self.zoom_at(sx, sy, factor)
    }

    /// Fits the given walls' extent into a `width x height` viewport with a
    /// pixel margin. Nothing happens for an empty set.
    pub fn fit_to_points(
        &mut self,
        points: impl IntoIterator<Item = Point>,
        width: f64,
        height: f64,
        margin: f64,
    ) -> bool {
        let Some((min_x, min_y, max_x, max_y)) = bounds_of(points) else {
            return false;
        };
        let avail_w = (width - margin * 2.0).max(1.0);
        let avail_h = (height - margin * 2.0).max(1.0);
        let extent_w = (max_x - min_x).max(1.0);
        let extent_h = (max_y - min_y).max(1.0);

        self.set_scale((avail_w / extent_w).min(avail_h / extent_h));
        let cx = (min_x + max_x) / 2.0;
        let cy = (min_y + max_y) / 2.0;
        self.pan = Point::new(width / 2.0 - cx * self.scale, height / 2.0 + cy * self.scale);
        true
    }

    pub fn reset(&mut self) {
        let (min, max, step) = (self.min_scale, self.max_scale, self.zoom_step);
        *self = Self::new(min, max, step);
    }
}

impl fmt::Display for StageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.1}px/ft | Pan: ({:.1}, {:.1})",
            self.scale, self.pan.x, self.pan.y
        )
    }
}
