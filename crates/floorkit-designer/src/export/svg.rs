//! Flat vector export of one floor.

use std::fmt::Write;

use floorkit_core::ExportError;
use tracing::{info, warn};

use crate::geometry::{bounds_of, lerp, Point, EPSILON};
use crate::model::{FloorId, OpeningKind, Project};

const WALL_COLOR: &str = "#333333";
const DOOR_COLOR: &str = "#c0392b";
const WINDOW_COLOR: &str = "#2e86de";
const BACKGROUND_COLOR: &str = "#ffffff";
/// Opening stroke width relative to the wall stroke.
const OPENING_STROKE_RATIO: f64 = 0.6;
/// Extent used for a floor without walls.
const EMPTY_BOUNDS: (f64, f64, f64, f64) = (-5.0, -5.0, 5.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Pixels per model unit.
    pub scale: f64,
    /// Margin around the plan in pixels.
    pub padding: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            scale: 40.0,
            padding: 40.0,
        }
    }
}

/// Maps model coordinates into the drawing, Y flipped.
struct PixelMap {
    min_x: f64,
    max_y: f64,
    scale: f64,
    padding: f64,
}

impl PixelMap {
    fn map(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.min_x) * self.scale + self.padding,
            (self.max_y - p.y) * self.scale + self.padding,
        )
    }
}

/// Renders the walls and openings of `floor_id` as a standalone SVG document.
pub fn export_svg(
    project: &Project,
    floor_id: &FloorId,
    options: &SvgOptions,
) -> Result<String, ExportError> {
    let floor = project
        .floor(floor_id)
        .ok_or_else(|| ExportError::UnknownFloor {
            id: floor_id.to_string(),
        })?;

    let (min_x, min_y, max_x, max_y) =
        bounds_of(project.walls_on_floor(floor_id).flat_map(|w| [w.a, w.b])).unwrap_or(EMPTY_BOUNDS);
    let map = PixelMap {
        min_x,
        max_y,
        scale: options.scale,
        padding: options.padding,
    };
    let width = (max_x - min_x) * options.scale + options.padding * 2.0;
    let height = (max_y - min_y) * options.scale + options.padding * 2.0;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">"
    );
    let _ = write!(svg, "<title>{}</title>", escape_xml(&floor.name));
    let _ = write!(
        svg,
        "<rect x=\"0\" y=\"0\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{BACKGROUND_COLOR}\"/>"
    );

    for wall in project.walls_on_floor(floor_id) {
        if wall.length() < EPSILON {
            warn!("Skipping zero-length wall {} in vector export", wall.id);
            continue;
        }
        let (x1, y1) = map.map(wall.a);
        let (x2, y2) = map.map(wall.b);
        let _ = write!(
            svg,
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{WALL_COLOR}\" stroke-width=\"{:.2}\" stroke-linecap=\"square\"/>",
            wall.thickness * options.scale
        );
    }

    for (wall, opening) in project.openings_on_floor(floor_id) {
        let len = wall.length();
        if len < EPSILON {
            continue;
        }
        let start = lerp(wall.a, wall.b, (opening.offset / len).clamp(0.0, 1.0));
        let end = lerp(wall.a, wall.b, (opening.end() / len).clamp(0.0, 1.0));
        let (x1, y1) = map.map(start);
        let (x2, y2) = map.map(end);
        let color = match opening.kind {
            OpeningKind::Door => DOOR_COLOR,
            OpeningKind::Window => WINDOW_COLOR,
        };
        let _ = write!(
            svg,
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{color}\" stroke-width=\"{:.2}\"/>",
            wall.thickness * options.scale * OPENING_STROKE_RATIO
        );
    }

    svg.push_str("</svg>");
    info!("Exported floor '{}' as SVG ({} bytes)", floor.name, svg.len());
    Ok(svg)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
