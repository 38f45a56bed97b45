use floorkit_core::Units;
use floorkit_designer::geometry::{
    distance_to_polygon, opening_polygon, point_in_polygon, project_point_on_segment, snap_point,
    snap_value, Point,
};
use floorkit_designer::model::{Opening, OpeningKind, Wall};
use floorkit_designer::FloorId;
use proptest::prelude::*;

fn door_on_wall(offset: f64, width: f64) -> (Wall, Opening) {
    let wall = Wall::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        0.5,
        FloorId::from("floor-1"),
    );
    let door = Opening::new(wall.id.clone(), OpeningKind::Door, offset, width, 6.75, 0.0);
    (wall, door)
}

#[test]
fn test_door_polygon_spans_offset_to_end() {
    let (wall, door) = door_on_wall(4.0, 3.0);
    let poly = opening_polygon(&wall, &door);
    let xs: Vec<f64> = poly.iter().map(|p| p.x).collect();
    assert_eq!(xs.iter().cloned().fold(f64::INFINITY, f64::min), 4.0);
    assert_eq!(xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 7.0);
    for p in &poly {
        assert!((p.y.abs() - 0.25).abs() < 1e-12);
    }
    assert!(point_in_polygon(Point::new(5.5, 0.0), &poly));
    assert!(!point_in_polygon(Point::new(8.0, 0.0), &poly));
    assert!((distance_to_polygon(Point::new(8.0, 0.0), &poly) - 1.0).abs() < 1e-12);
}

#[test]
fn test_metric_snap_is_ten_centimetres() {
    // 1 m = 3.28084 ft; nearest 10 cm step of 0.3 ft is 0.1 m
    let snapped = snap_value(0.3, Units::Metric);
    assert!((snapped - 0.328084).abs() < 1e-6);
}

#[test]
fn test_snap_point_folds_negative_zero() {
    let p = snap_point(Point::new(-0.1, 0.2), Units::Imperial);
    assert_eq!(p, Point::new(0.0, 0.0));
    assert!(p.x.is_sign_positive());
}

proptest! {
    #[test]
    fn prop_snap_is_idempotent(v in -1.0e4f64..1.0e4, metric in any::<bool>()) {
        let units = if metric { Units::Metric } else { Units::Imperial };
        let once = snap_value(v, units);
        prop_assert_eq!(snap_value(once, units), once);
        prop_assert!((once - v).abs() <= units.snap_step() / 2.0 + 1e-9);
    }

    #[test]
    fn prop_projection_stays_on_segment(
        px in -50.0f64..50.0, py in -50.0f64..50.0,
        bx in 1.0f64..20.0, by in -20.0f64..20.0,
    ) {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(bx, by);
        let proj = project_point_on_segment(Point::new(px, py), a, b);
        prop_assert!((0.0..=1.0).contains(&proj.t));
        prop_assert!(proj.distance <= Point::new(px, py).distance_to(&a) + 1e-9);
    }
}
