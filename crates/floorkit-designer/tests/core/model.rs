use floorkit_core::ModelError;
use floorkit_designer::geometry::Point;
use floorkit_designer::model::{OpeningKind, Project, WallEnd};
use proptest::prelude::*;

fn project_with_wall(length: f64) -> (Project, floorkit_designer::WallId) {
    let mut project = Project::new();
    let floor = project.active_floor_id().clone();
    let wall = project
        .add_wall(Point::new(0.0, 0.0), Point::new(length, 0.0), 0.5, &floor)
        .unwrap();
    (project, wall)
}

#[test]
fn test_opening_is_clamped_on_insert() {
    let (mut project, wall) = project_with_wall(10.0);
    let id = project
        .add_opening(&wall, OpeningKind::Window, 9.0, 4.0, 4.0, 3.0)
        .unwrap();
    let op = project.opening(&id).unwrap();
    assert_eq!(op.offset, 6.0);
    assert_eq!(op.end(), 10.0);
}

#[test]
fn test_oversized_opening_shrinks_to_wall() {
    let (mut project, wall) = project_with_wall(2.0);
    let id = project
        .add_opening(&wall, OpeningKind::Door, 0.5, 3.0, 6.75, 0.0)
        .unwrap();
    let op = project.opening(&id).unwrap();
    assert_eq!(op.offset, 0.0);
    assert_eq!(op.width, 2.0);
}

#[test]
fn test_shortening_wall_rescales_openings() {
    let (mut project, wall) = project_with_wall(10.0);
    let id = project
        .add_opening(&wall, OpeningKind::Door, 4.0, 3.0, 6.75, 0.0)
        .unwrap();
    project
        .move_wall_endpoint(&wall, WallEnd::B, Point::new(6.0, 0.0))
        .unwrap();
    let op = project.opening(&id).unwrap();
    assert!((op.offset - 2.4).abs() < 1e-9);
    assert_eq!(op.width, 3.0);
    assert!(project.validate().is_ok());
}

#[test]
fn test_removing_wall_cascades() {
    let (mut project, wall) = project_with_wall(10.0);
    project
        .add_opening(&wall, OpeningKind::Door, 1.0, 3.0, 6.75, 0.0)
        .unwrap();
    project
        .add_opening(&wall, OpeningKind::Window, 5.0, 4.0, 4.0, 3.0)
        .unwrap();
    let floor = project.active_floor_id().clone();
    let other = project
        .add_wall(Point::new(0.0, 5.0), Point::new(10.0, 5.0), 0.5, &floor)
        .unwrap();
    let survivor = project
        .add_opening(&other, OpeningKind::Door, 2.0, 3.0, 6.75, 0.0)
        .unwrap();

    let removed = project.remove_wall(&wall).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(project.openings().len(), 1);
    assert_eq!(project.openings()[0].id, survivor);
    assert_eq!(project.openings()[0].wall_id, other);
    assert!(project.wall(&other).is_some());
}

#[test]
fn test_last_floor_cannot_be_removed() {
    let mut project = Project::new();
    let only = project.active_floor_id().clone();
    assert_eq!(project.remove_floor(&only), Err(ModelError::LastFloor));

    let second = project.add_floor(None, 9.0).unwrap();
    assert_eq!(project.floor(&second).unwrap().name, "Level 2");
    assert_eq!(project.floor(&second).unwrap().elevation, 10.0);
    project.remove_floor(&only).unwrap();
    assert_eq!(project.floors().len(), 1);
    assert_eq!(project.active_floor_id(), &second);
}

#[test]
fn test_floor_removal_drops_its_walls_only() {
    let (mut project, ground_wall) = project_with_wall(10.0);
    let upper = project.add_floor(Some("Loft"), 8.0).unwrap();
    let upper_wall = project
        .add_wall(Point::new(0.0, 0.0), Point::new(0.0, 4.0), 0.5, &upper)
        .unwrap();
    project
        .add_opening(&upper_wall, OpeningKind::Window, 0.0, 2.0, 3.0, 3.0)
        .unwrap();

    project.remove_floor(&upper).unwrap();
    assert!(project.wall(&ground_wall).is_some());
    assert!(project.wall(&upper_wall).is_none());
    assert!(project.openings().is_empty());
}

#[test]
fn test_invalid_wall_edits_are_rejected() {
    let (mut project, wall) = project_with_wall(10.0);
    assert!(matches!(
        project.set_wall_thickness(&wall, 0.0),
        Err(ModelError::InvalidThickness { .. })
    ));
    assert!(matches!(
        project.set_wall_endpoints(&wall, Point::new(1.0, 1.0), Point::new(1.0, 1.0)),
        Err(ModelError::ZeroLengthWall { .. })
    ));
    assert_eq!(project.wall(&wall).unwrap().length(), 10.0);
}

proptest! {
    #[test]
    fn prop_openings_always_fit(
        length in 0.5f64..40.0,
        offset in -20.0f64..60.0,
        width in 0.1f64..50.0,
        new_length in 0.5f64..40.0,
    ) {
        let (mut project, wall) = project_with_wall(length);
        let id = project
            .add_opening(&wall, OpeningKind::Door, offset, width, 6.75, 0.0)
            .unwrap();
        prop_assert!(project.opening(&id).unwrap().fits(length));

        project
            .move_wall_endpoint(&wall, WallEnd::B, Point::new(new_length, 0.0))
            .unwrap();
        let op = project.opening(&id).unwrap();
        prop_assert!(op.fits(new_length));
        prop_assert!(op.offset >= 0.0);
        prop_assert!(project.validate().is_ok());
    }
}
