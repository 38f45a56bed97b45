use floorkit_core::EditorEvent;
use floorkit_designer::{EditorState, OpeningKind, Point, PointerEvent, Selection, Tool};

/// Pointer event at a model position under the default view.
fn at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::primary(400.0 + 40.0 * x, 300.0 - 40.0 * y)
}

fn click(editor: &mut EditorState, x: f64, y: f64) {
    editor.pointer_down(&at(x, y));
    editor.pointer_up(&at(x, y));
}

#[test]
fn test_two_clicks_draw_a_snapped_wall() {
    let mut editor = EditorState::new();
    editor.set_tool(Tool::DrawWall);
    click(&mut editor, 0.1, 0.2);
    assert!(editor.draft().is_some());
    click(&mut editor, 7.9, 0.1);

    let walls = editor.project().walls();
    assert_eq!(walls.len(), 1);
    assert_eq!(walls[0].a, Point::new(0.0, 0.0));
    assert_eq!(walls[0].b, Point::new(8.0, 0.0));
    assert_eq!(walls[0].thickness, 0.5);
    assert_eq!(&walls[0].floor_id, editor.project().active_floor_id());
    assert!(editor.draft().is_none());
}

#[test]
fn test_undo_twice_redo_once_leaves_one_wall() {
    let mut editor = EditorState::new();
    editor.set_tool(Tool::DrawWall);
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 5.0, 0.0);
    click(&mut editor, 5.0, 0.0);
    click(&mut editor, 5.0, 5.0);
    assert_eq!(editor.project().walls().len(), 2);

    assert!(editor.undo());
    assert!(editor.undo());
    assert!(editor.project().walls().is_empty());
    assert!(editor.redo());
    assert_eq!(editor.project().walls().len(), 1);
    assert_eq!(editor.project().walls()[0].b, Point::new(5.0, 0.0));
    assert!(editor.can_redo());
}

#[test]
fn test_second_click_on_start_discards_draft() {
    let mut editor = EditorState::new();
    editor.set_tool(Tool::DrawWall);
    click(&mut editor, 2.0, 2.0);
    click(&mut editor, 2.1, 1.9);
    assert!(editor.project().walls().is_empty());
    assert!(editor.draft().is_none());
    assert!(!editor.can_undo());
}

#[test]
fn test_draft_follows_pointer() {
    let mut editor = EditorState::new();
    let mut rx = editor.events().receiver();
    editor.set_tool(Tool::DrawWall);
    click(&mut editor, 0.0, 0.0);
    editor.pointer_move(&at(3.2, 0.0));
    assert_eq!(editor.draft().unwrap().end, Point::new(3.0, 0.0));

    let events: Vec<EditorEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert!(events.contains(&EditorEvent::ToolChanged {
        tool: "draw-wall".to_string()
    }));
    assert!(events.iter().filter(|e| **e == EditorEvent::DraftChanged).count() >= 2);
    assert!(!events.iter().any(|e| matches!(e, EditorEvent::ProjectChanged { .. })));
}

#[test]
fn test_switching_tool_cancels_draft() {
    let mut editor = EditorState::new();
    editor.set_tool(Tool::DrawWall);
    click(&mut editor, 0.0, 0.0);
    editor.set_tool(Tool::Select);
    assert!(editor.draft().is_none());
    assert_eq!(editor.tool(), Tool::Select);
}

#[test]
fn test_place_door_on_wall() {
    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    editor.set_tool(Tool::PlaceDoor);
    click(&mut editor, 2.1, 0.1);

    let openings = editor.project().openings();
    assert_eq!(openings.len(), 1);
    let door = &openings[0];
    assert_eq!(door.kind, OpeningKind::Door);
    assert_eq!(door.wall_id, wall);
    assert_eq!(door.offset, 2.0);
    assert_eq!(door.width, 3.0);
    assert_eq!(door.height, 6.75);
    assert_eq!(editor.selection(), &Selection::Opening(door.id.clone()));
}

#[test]
fn test_window_near_wall_end_is_clamped() {
    let mut editor = EditorState::new();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    editor.set_tool(Tool::PlaceWindow);
    click(&mut editor, 9.5, 0.0);

    let window = &editor.project().openings()[0];
    assert_eq!(window.kind, OpeningKind::Window);
    assert_eq!(window.offset, 6.0);
    assert_eq!(window.sill, 3.0);
}

#[test]
fn test_place_opening_off_wall_does_nothing() {
    let mut editor = EditorState::new();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    editor.set_tool(Tool::PlaceDoor);
    click(&mut editor, 5.0, 4.0);
    assert!(editor.project().openings().is_empty());
    assert_eq!(editor.history().undo_depth(), 1);
}
