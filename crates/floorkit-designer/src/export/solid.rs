//! Profile extrusion and wall solids.
//!
//! A wall solid is built from the wall's elevation face: a `length x height`
//! rectangle with one rectangular hole per hosted opening. The face is
//! extruded across the wall thickness and placed in world space (Y up, plan
//! Y mapped to -Z) at the floor's elevation.

use floorkit_core::ExportError;
use nalgebra::{Isometry3, Point3, Vector3};
use tracing::warn;

use crate::geometry::{angle_between_points, EPSILON};
use crate::model::{FloorId, Opening, Project, Wall, WallId};

/// Holes are kept at least this far inside the face outline.
const FRAME_EPSILON: f64 = 1e-3;

/// A planar polygon with holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile2D {
    pub outer: Vec<[f64; 2]>,
    pub holes: Vec<Vec<[f64; 2]>>,
}

impl Profile2D {
    pub fn new(outer: Vec<[f64; 2]>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Axis-aligned rectangle `[x0, x1] x [y0, y1]`, counter-clockwise.
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(rect_ring(x0, y0, x1, y1))
    }

    pub fn add_hole(&mut self, hole: Vec<[f64; 2]>) {
        self.holes.push(hole);
    }
}

/// A 3D triangle with its face normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3D {
    pub vertices: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
}

impl Triangle3D {
    /// Builds a triangle, or `None` when it has no area.
    pub fn new(v1: Point3<f32>, v2: Point3<f32>, v3: Point3<f32>) -> Option<Self> {
        let cross = (v2 - v1).cross(&(v3 - v1));
        let len = cross.norm();
        if len <= f32::EPSILON {
            return None;
        }
        Some(Self {
            vertices: [v1, v2, v3],
            normal: cross / len,
        })
    }

    fn transformed(&self, iso: &Isometry3<f32>) -> Self {
        Self {
            vertices: self.vertices.map(|v| iso.transform_point(&v)),
            normal: iso.transform_vector(&self.normal),
        }
    }
}

/// World-space solid of one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSolid {
    pub wall_id: WallId,
    pub floor_id: FloorId,
    /// `<floor name>/<wall id>`
    pub name: String,
    pub triangles: Vec<Triangle3D>,
}

/// Options shared by the volumetric exporters.
///
/// Walls are extruded to their floor's height. A floor whose height is zero
/// (a plan sketched before any height was set) would produce flat walls that
/// triangulate to nothing, so those floors are extruded to
/// `fallback_floor_height` instead and still show up in 3D output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidOptions {
    /// Wall height used on floors whose height is zero.
    pub fallback_floor_height: f64,
}

impl Default for SolidOptions {
    fn default() -> Self {
        Self {
            fallback_floor_height: 10.0,
        }
    }
}

fn rect_ring(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<[f64; 2]> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

fn signed_area(ring: &[[f64; 2]]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let [x1, y1] = ring[i];
            let [x2, y2] = ring[(i + 1) % n];
            x1 * y2 - x2 * y1
        })
        .sum::<f64>()
        / 2.0
}

fn oriented(ring: &[[f64; 2]], ccw: bool) -> Vec<[f64; 2]> {
    let mut ring = ring.to_vec();
    if (signed_area(&ring) > 0.0) != ccw {
        ring.reverse();
    }
    ring
}

fn vertex(p: [f64; 2], z: f64) -> Point3<f32> {
    Point3::new(p[0] as f32, p[1] as f32, z as f32)
}

/// Extrudes a profile along +Z from `z = 0` to `z = depth`.
///
/// Caps are triangulated with earcut; every ring edge becomes one side quad.
/// The outer ring is wound counter-clockwise and holes clockwise first, so all
/// normals point out of the solid.
pub fn extrude_profile(profile: &Profile2D, depth: f64) -> Result<Vec<Triangle3D>, ExportError> {
    if profile.outer.len() < 3 || depth <= 0.0 {
        return Ok(Vec::new());
    }

    let mut rings = vec![oriented(&profile.outer, true)];
    rings.extend(
        profile
            .holes
            .iter()
            .filter(|h| h.len() >= 3)
            .map(|h| oriented(h, false)),
    );

    let points: Vec<[f64; 2]> = rings.iter().flatten().copied().collect();
    let mut hole_indices = Vec::with_capacity(rings.len() - 1);
    let mut start = 0;
    for ring in &rings[..rings.len() - 1] {
        start += ring.len();
        hole_indices.push(start);
    }
    let flat: Vec<f64> = points.iter().flat_map(|p| [p[0], p[1]]).collect();
    let indices =
        earcutr::earcut(&flat, &hole_indices, 2).map_err(|e| ExportError::Triangulation {
            element: "profile".to_string(),
            reason: format!("{e:?}"),
        })?;

    let mut triangles = Vec::with_capacity(indices.len() / 3 * 2 + points.len() * 2);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (points[tri[0]], points[tri[1]], points[tri[2]]);
        let turn = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        let (b, c) = if turn >= 0.0 { (b, c) } else { (c, b) };
        triangles.extend(Triangle3D::new(vertex(a, depth), vertex(b, depth), vertex(c, depth)));
        triangles.extend(Triangle3D::new(vertex(a, 0.0), vertex(c, 0.0), vertex(b, 0.0)));
    }

    for ring in &rings {
        for i in 0..ring.len() {
            let p = ring[i];
            let q = ring[(i + 1) % ring.len()];
            let (p0, q0) = (vertex(p, 0.0), vertex(q, 0.0));
            let (p1, q1) = (vertex(p, depth), vertex(q, depth));
            triangles.extend(Triangle3D::new(p0, q0, q1));
            triangles.extend(Triangle3D::new(p0, q1, p1));
        }
    }
    Ok(triangles)
}

/// Elevation-face profile of a wall of the given height.
///
/// Opening holes are clamped to the face, overlapping holes are merged into
/// their common bounding box, and every hole is inset by a small frame so it
/// never touches the outline.
pub fn wall_profile(wall: &Wall, openings: &[&Opening], height: f64) -> Profile2D {
    let length = wall.length();
    let mut profile = Profile2D::rectangle(0.0, 0.0, length, height);

    let mut rects: Vec<[f64; 4]> = openings
        .iter()
        .filter_map(|op| {
            let x0 = op.offset.clamp(0.0, length);
            let x1 = op.end().clamp(0.0, length);
            let y0 = op.sill.clamp(0.0, height);
            let y1 = (op.sill + op.height).clamp(0.0, height);
            (x1 - x0 > EPSILON && y1 - y0 > EPSILON).then_some([x0, y0, x1, y1])
        })
        .collect();
    merge_overlapping(&mut rects);

    for [x0, y0, x1, y1] in rects {
        let x0 = x0.max(FRAME_EPSILON);
        let y0 = y0.max(FRAME_EPSILON);
        let x1 = x1.min(length - FRAME_EPSILON);
        let y1 = y1.min(height - FRAME_EPSILON);
        if x1 - x0 > FRAME_EPSILON && y1 - y0 > FRAME_EPSILON {
            profile.add_hole(rect_ring(x0, y0, x1, y1));
        }
    }
    profile
}

fn merge_overlapping(rects: &mut Vec<[f64; 4]>) {
    let overlaps =
        |a: &[f64; 4], b: &[f64; 4]| a[0] <= b[2] && b[0] <= a[2] && a[1] <= b[3] && b[1] <= a[3];
    let mut merged = true;
    while merged {
        merged = false;
        'outer: for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                if overlaps(&rects[i], &rects[j]) {
                    let b = rects.swap_remove(j);
                    let a = &mut rects[i];
                    *a = [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])];
                    merged = true;
                    break 'outer;
                }
            }
        }
    }
    rects.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
}

/// Builds the world-space solid of one wall, or `None` for a zero-length
/// wall.
pub fn wall_solid(
    wall: &Wall,
    openings: &[&Opening],
    elevation: f64,
    height: f64,
    name: String,
) -> Result<Option<WallSolid>, ExportError> {
    if wall.length() < EPSILON {
        warn!("Skipping zero-length wall {} in volumetric export", wall.id);
        return Ok(None);
    }

    let profile = wall_profile(wall, openings, height);
    let local = extrude_profile(&profile, wall.thickness).map_err(|e| match e {
        ExportError::Triangulation { reason, .. } => ExportError::Triangulation {
            element: wall.id.to_string(),
            reason,
        },
        other => other,
    })?;

    // center the extrusion on the wall axis, then rotate about +Y into the
    // wall direction and move to its start point
    let center = Isometry3::translation(0.0, 0.0, -(wall.thickness as f32) / 2.0);
    let angle = angle_between_points(wall.a, wall.b) as f32;
    let place = Isometry3::new(
        Vector3::new(wall.a.x as f32, elevation as f32, -wall.a.y as f32),
        Vector3::y() * angle,
    );
    let iso = place * center;

    Ok(Some(WallSolid {
        wall_id: wall.id.clone(),
        floor_id: wall.floor_id.clone(),
        name,
        triangles: local.iter().map(|t| t.transformed(&iso)).collect(),
    }))
}

/// Solids for every wall on every floor, in floor then wall order.
pub fn wall_solids(project: &Project, options: &SolidOptions) -> Result<Vec<WallSolid>, ExportError> {
    let mut solids = Vec::new();
    for floor in project.floors() {
        let height = if floor.height > EPSILON {
            floor.height
        } else {
            options.fallback_floor_height
        };
        for wall in project.walls_on_floor(&floor.id) {
            let openings: Vec<&Opening> = project.openings_on_wall(&wall.id).collect();
            let name = format!("{}/{}", floor.name, wall.id);
            if let Some(solid) = wall_solid(wall, &openings, floor.elevation, height, name)? {
                solids.push(solid);
            }
        }
    }
    Ok(solids)
}
