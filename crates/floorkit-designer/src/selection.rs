//! Selection state and hit-testing against the active floor.

use crate::geometry::{
    distance, distance_to_polygon, opening_polygon, project_point_on_segment, Point,
    SegmentProjection,
};
use crate::model::{FloorId, OpeningId, Project, Wall, WallEnd, WallId};

/// What is currently selected. Transient; never persisted or snapshotted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Wall(WallId),
    Opening(OpeningId),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Selection::None => None,
            Selection::Wall(_) => Some("wall"),
            Selection::Opening(_) => Some("opening"),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Wall(id) => Some(id.as_str()),
            Selection::Opening(id) => Some(id.as_str()),
        }
    }

    /// Whether the selected element still exists in `project`.
    pub fn exists_in(&self, project: &Project) -> bool {
        match self {
            Selection::None => true,
            Selection::Wall(id) => project.wall(id).is_some(),
            Selection::Opening(id) => project.opening(id).is_some(),
        }
    }
}

/// Result of a pointer hit-test.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Opening(OpeningId),
    WallEndpoint(WallId, WallEnd),
    WallBody(WallId),
}

impl Hit {
    pub fn to_selection(&self) -> Selection {
        match self {
            Hit::Opening(id) => Selection::Opening(id.clone()),
            Hit::WallEndpoint(id, _) | Hit::WallBody(id) => Selection::Wall(id.clone()),
        }
    }
}

/// Hit tolerance of a wall in model units.
pub fn wall_tolerance(wall: &Wall, min_radius: f64) -> f64 {
    wall.thickness.max(min_radius)
}

/// Closest wall on `floor_id` whose axis is within tolerance of `p`.
pub fn closest_wall<'a>(
    project: &'a Project,
    floor_id: &'a FloorId,
    p: Point,
    min_radius: f64,
) -> Option<(&'a Wall, SegmentProjection)> {
    project
        .walls_on_floor(floor_id)
        .filter_map(|wall| {
            let proj = project_point_on_segment(p, wall.a, wall.b);
            (proj.distance <= wall_tolerance(wall, min_radius)).then_some((wall, proj))
        })
        .min_by(|(_, x), (_, y)| x.distance.total_cmp(&y.distance))
}

/// Hit-tests openings first, then walls. A wall hit near one of its
/// endpoints reports that endpoint.
pub fn hit_test(project: &Project, floor_id: &FloorId, p: Point, min_radius: f64) -> Option<Hit> {
    let opening = project
        .openings_on_floor(floor_id)
        .filter_map(|(wall, op)| {
            let d = distance_to_polygon(p, &opening_polygon(wall, op));
            (d <= wall_tolerance(wall, min_radius)).then_some((op, d))
        })
        .min_by(|(_, x), (_, y)| x.total_cmp(y));
    if let Some((op, _)) = opening {
        return Some(Hit::Opening(op.id.clone()));
    }

    let (wall, _) = closest_wall(project, floor_id, p, min_radius)?;
    let tol = wall_tolerance(wall, min_radius);
    let da = distance(p, wall.a);
    let db = distance(p, wall.b);
    let hit = if da <= tol && da <= db {
        Hit::WallEndpoint(wall.id.clone(), WallEnd::A)
    } else if db <= tol {
        Hit::WallEndpoint(wall.id.clone(), WallEnd::B)
    } else {
        Hit::WallBody(wall.id.clone())
    };
    Some(hit)
}
