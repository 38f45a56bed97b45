use floorkit_designer::{
    EditorState, Key, KeyEvent, Modifiers, OpeningKind, Point, Selection, Tool, WheelEvent,
};

fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    }
}

#[test]
fn test_delete_wall_removes_hosted_openings() {
    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(12.0, 0.0))
        .unwrap();
    editor.add_opening(&wall, OpeningKind::Door, 1.0).unwrap();
    editor.add_opening(&wall, OpeningKind::Window, 6.0).unwrap();
    editor.select(Selection::Wall(wall.clone()));

    assert!(editor.key_down(&KeyEvent::new(Key::Delete)));
    assert!(editor.project().walls().is_empty());
    assert!(editor.project().openings().is_empty());
    assert!(editor.selection().is_none());

    // one undo brings back the wall with both openings
    assert!(editor.key_down(&KeyEvent::new(Key::Char('z')).with_modifiers(ctrl())));
    assert_eq!(editor.project().walls().len(), 1);
    assert_eq!(editor.project().openings().len(), 2);
}

#[test]
fn test_backspace_deletes_selected_opening() {
    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(12.0, 0.0))
        .unwrap();
    let door = editor.add_opening(&wall, OpeningKind::Door, 1.0).unwrap();
    editor.select(Selection::Opening(door));

    assert!(editor.key_down(&KeyEvent::new(Key::Backspace)));
    assert!(editor.project().openings().is_empty());
    assert_eq!(editor.project().walls().len(), 1);
}

#[test]
fn test_delete_without_selection_is_ignored() {
    let mut editor = EditorState::new();
    assert!(!editor.key_down(&KeyEvent::new(Key::Delete)));
}

#[test]
fn test_redo_shortcuts() {
    let mut editor = EditorState::new();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(2.0, 0.0))
        .unwrap();
    editor.undo();

    let shift_ctrl = Modifiers {
        shift: true,
        ..ctrl()
    };
    assert!(editor.key_down(&KeyEvent::new(Key::Char('Z')).with_modifiers(shift_ctrl)));
    assert_eq!(editor.project().walls().len(), 1);

    editor.undo();
    assert!(editor.key_down(&KeyEvent::new(Key::Char('y')).with_modifiers(ctrl())));
    assert_eq!(editor.project().walls().len(), 1);
    assert!(!editor.key_down(&KeyEvent::new(Key::Char('y')).with_modifiers(ctrl())));
}

#[test]
fn test_tool_shortcuts() {
    let mut editor = EditorState::new();
    assert!(editor.key_down(&KeyEvent::new(Key::Char('w'))));
    assert_eq!(editor.tool(), Tool::DrawWall);
    assert!(editor.key_down(&KeyEvent::new(Key::Char('D'))));
    assert_eq!(editor.tool(), Tool::PlaceDoor);
    // command chords are not tool shortcuts
    assert!(!editor.key_down(&KeyEvent::new(Key::Char('v')).with_modifiers(ctrl())));
    assert_eq!(editor.tool(), Tool::PlaceDoor);
    assert!(!editor.key_down(&KeyEvent::new(Key::Char('q'))));
}

#[test]
fn test_escape_cancels_draft_then_clears_selection() {
    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(2.0, 0.0))
        .unwrap();
    editor.select(Selection::Wall(wall));
    editor.set_tool(Tool::DrawWall);
    editor.pointer_down(&floorkit_designer::PointerEvent::primary(400.0, 200.0));
    assert!(editor.draft().is_some());

    editor.key_down(&KeyEvent::new(Key::Escape));
    assert!(editor.draft().is_none());
    assert!(!editor.selection().is_none());

    editor.key_down(&KeyEvent::new(Key::Escape));
    assert!(editor.selection().is_none());
}

#[test]
fn test_wheel_zoom_is_not_recorded() {
    let mut editor = EditorState::new();
    assert!(editor.wheel(&WheelEvent {
        x: 400.0,
        y: 300.0,
        delta_y: -120.0,
    }));
    assert!((editor.view().scale() - 44.0).abs() < 1e-9);
    assert!(!editor.can_undo());
}
