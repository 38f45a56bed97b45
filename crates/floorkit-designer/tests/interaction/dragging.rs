use floorkit_designer::{
    EditorState, Key, KeyEvent, Modifiers, OpeningKind, Point, PointerButton, PointerEvent,
    Selection, WallId,
};

fn at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::primary(400.0 + 40.0 * x, 300.0 - 40.0 * y)
}

fn editor_with_door() -> (EditorState, WallId) {
    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    editor.add_opening(&wall, OpeningKind::Door, 4.0).unwrap();
    (editor, wall)
}

#[test]
fn test_endpoint_drag_rescales_door() {
    let (mut editor, wall) = editor_with_door();
    let depth = editor.history().undo_depth();

    editor.pointer_down(&at(10.0, 0.0));
    assert_eq!(editor.selection(), &Selection::Wall(wall.clone()));
    editor.pointer_move(&at(8.0, 0.0));
    editor.pointer_move(&at(7.0, 0.0));
    editor.pointer_move(&at(6.0, 0.0));
    editor.pointer_up(&at(6.0, 0.0));

    let project = editor.project();
    assert_eq!(project.wall(&wall).unwrap().b, Point::new(6.0, 0.0));
    let door = &project.openings()[0];
    // rescaled from the press-time wall, not from each intermediate step
    assert!((door.offset - 2.4).abs() < 1e-9);
    assert_eq!(door.width, 3.0);
    assert_eq!(editor.history().undo_depth(), depth + 1);

    assert!(editor.undo());
    let project = editor.project();
    assert_eq!(project.wall(&wall).unwrap().b, Point::new(10.0, 0.0));
    assert_eq!(project.openings()[0].offset, 4.0);
}

#[test]
fn test_drag_there_and_back_is_not_recorded() {
    let (mut editor, wall) = editor_with_door();
    let depth = editor.history().undo_depth();

    editor.pointer_down(&at(0.0, 0.0));
    editor.pointer_move(&at(-3.0, 0.0));
    editor.pointer_move(&at(0.0, 0.0));
    editor.pointer_up(&at(0.0, 0.0));

    assert_eq!(editor.history().undo_depth(), depth);
    assert_eq!(editor.project().wall(&wall).unwrap().a, Point::new(0.0, 0.0));
}

#[test]
fn test_body_drag_translates_wall() {
    let (mut editor, wall) = editor_with_door();
    editor.pointer_down(&at(2.0, 0.0));
    editor.pointer_move(&at(2.2, 3.1));
    editor.pointer_up(&at(2.2, 3.1));

    let moved = editor.project().wall(&wall).unwrap();
    assert_eq!(moved.a, Point::new(0.0, 3.0));
    assert_eq!(moved.b, Point::new(10.0, 3.0));
    assert_eq!(editor.project().openings()[0].offset, 4.0);
}

#[test]
fn test_collapsing_drag_is_ignored() {
    let (mut editor, wall) = editor_with_door();
    editor.pointer_down(&at(10.0, 0.0));
    editor.pointer_move(&at(5.0, 0.0));
    editor.pointer_move(&at(0.1, 0.0));
    // zero length rejected; the last valid position stays
    assert_eq!(editor.project().wall(&wall).unwrap().b, Point::new(5.0, 0.0));
    editor.pointer_up(&at(0.1, 0.0));
    assert!(editor.project().validate().is_ok());
}

#[test]
fn test_escape_cancels_drag() {
    let (mut editor, wall) = editor_with_door();
    let depth = editor.history().undo_depth();
    editor.pointer_down(&at(10.0, 0.0));
    editor.pointer_move(&at(14.0, 0.0));
    assert!(editor.is_dragging());

    assert!(editor.cancel_gesture());
    assert!(!editor.is_dragging());
    assert_eq!(editor.project().wall(&wall).unwrap().b, Point::new(10.0, 0.0));
    editor.pointer_up(&at(14.0, 0.0));
    assert_eq!(editor.history().undo_depth(), depth);
}

#[test]
fn test_pan_is_not_undoable() {
    let mut editor = EditorState::new();
    let before = editor.view().pan();

    let press = PointerEvent::primary(100.0, 100.0).with_button(PointerButton::Middle);
    editor.pointer_down(&press);
    editor.pointer_move(&PointerEvent::primary(130.0, 80.0));
    editor.pointer_up(&PointerEvent::primary(130.0, 80.0));

    assert_eq!(editor.view().pan(), Point::new(before.x + 30.0, before.y - 20.0));
    assert!(!editor.can_undo());
}

#[test]
fn test_alt_drag_pans_instead_of_moving_wall() {
    let (mut editor, wall) = editor_with_door();
    let alt = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };
    editor.pointer_down(&at(2.0, 0.0).with_modifiers(alt));
    editor.pointer_move(&at(4.0, 0.0));
    editor.pointer_up(&at(4.0, 0.0));

    assert_eq!(editor.project().wall(&wall).unwrap().a, Point::new(0.0, 0.0));
    assert_eq!(editor.view().pan().x, 480.0);
}

#[test]
fn test_delete_during_drag_is_one_step() {
    let (mut editor, wall) = editor_with_door();
    let depth = editor.history().undo_depth();

    editor.pointer_down(&at(2.0, 0.0));
    editor.pointer_move(&at(2.0, 3.0));
    assert!(editor.key_down(&KeyEvent::new(Key::Delete)));
    editor.pointer_up(&at(2.0, 3.0));

    assert!(editor.project().walls().is_empty());
    assert!(!editor.is_dragging());
    assert_eq!(editor.history().undo_depth(), depth + 1);

    // the uncommitted drag position never reaches history
    assert!(editor.undo());
    assert_eq!(editor.project().wall(&wall).unwrap().a, Point::new(0.0, 0.0));
    assert_eq!(editor.project().openings().len(), 1);
    assert_eq!(editor.history().undo_depth(), depth);
}

#[test]
fn test_add_floor_during_drag_keeps_new_floor() {
    let (mut editor, wall) = editor_with_door();
    let depth = editor.history().undo_depth();

    editor.pointer_down(&at(2.0, 0.0));
    editor.pointer_move(&at(2.0, 3.0));
    let upper = editor.add_floor(Some("Upper")).unwrap();
    editor.pointer_up(&at(2.0, 3.0));

    assert_eq!(editor.project().floors().len(), 2);
    assert!(editor.project().floor(&upper).is_some());
    assert_eq!(editor.active_floor_id(), upper);
    assert_eq!(editor.project().wall(&wall).unwrap().a, Point::new(0.0, 0.0));
    assert_eq!(editor.history().undo_depth(), depth + 1);

    assert!(editor.undo());
    assert_eq!(editor.project().floors().len(), 1);
    assert_eq!(editor.project().wall(&wall).unwrap().a, Point::new(0.0, 0.0));
}
