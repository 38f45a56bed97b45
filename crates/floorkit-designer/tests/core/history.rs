use floorkit_core::EditorEvent;
use floorkit_designer::geometry::Point;
use floorkit_designer::history::History;
use floorkit_designer::model::{OpeningKind, Project};
use floorkit_designer::EditorState;
use proptest::prelude::*;

fn add_wall(history: &mut History, project: &mut Project, x: f64) {
    let snapshot = history.begin_interaction(project);
    let floor = project.active_floor_id().clone();
    project
        .add_wall(Point::new(x, 0.0), Point::new(x, 5.0), 0.5, &floor)
        .unwrap();
    history.commit_interaction(snapshot);
}

#[test]
fn test_undo_redo_walks_snapshots() {
    let mut history = History::new(10);
    let mut project = Project::new();
    add_wall(&mut history, &mut project, 0.0);
    add_wall(&mut history, &mut project, 1.0);

    assert!(history.undo(&mut project));
    assert!(history.undo(&mut project));
    assert!(project.walls().is_empty());
    assert!(!history.undo(&mut project));

    assert!(history.redo(&mut project));
    assert_eq!(project.walls().len(), 1);
    assert_eq!(history.undo_depth(), 1);
    assert_eq!(history.redo_depth(), 1);
}

#[test]
fn test_commit_clears_redo() {
    let mut history = History::new(10);
    let mut project = Project::new();
    add_wall(&mut history, &mut project, 0.0);
    history.undo(&mut project);
    assert!(history.can_redo());

    add_wall(&mut history, &mut project, 2.0);
    assert!(!history.can_redo());
    assert_eq!(project.walls()[0].a.x, 2.0);
}

#[test]
fn test_depth_is_bounded() {
    let mut history = History::new(3);
    let mut project = Project::new();
    for i in 0..6 {
        add_wall(&mut history, &mut project, i as f64);
    }
    assert_eq!(history.undo_depth(), 3);
    while history.undo(&mut project) {}
    // the three oldest steps were dropped
    assert_eq!(project.walls().len(), 3);
}

#[test]
fn test_snapshots_are_independent() {
    let mut history = History::new(10);
    let mut project = Project::new();
    add_wall(&mut history, &mut project, 0.0);
    let id = project.walls()[0].id.clone();

    let snapshot = history.begin_interaction(&project);
    project.set_wall_thickness(&id, 2.0).unwrap();
    history.commit_interaction(snapshot);

    history.undo(&mut project);
    assert_eq!(project.wall(&id).unwrap().thickness, 0.5);
}

#[test]
fn test_redo_without_future_leaves_project_alone() {
    let mut history = History::new(10);
    let mut project = Project::new();
    add_wall(&mut history, &mut project, 0.0);
    let before = project.clone();

    assert!(!history.redo(&mut project));
    assert_eq!(project, before);
    assert_eq!(history.undo_depth(), 1);
}

#[test]
fn test_undo_and_redo_announce_replaced_project() {
    let mut editor = EditorState::new();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(5.0, 0.0))
        .unwrap();
    let mut rx = editor.events().receiver();

    assert!(editor.undo());
    assert!(editor.redo());
    let events: Vec<EditorEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();

    let replaced = events
        .iter()
        .filter(|e| **e == EditorEvent::ProjectReplaced)
        .count();
    assert_eq!(replaced, 2);
    assert!(!events
        .iter()
        .any(|e| matches!(e, EditorEvent::ProjectChanged { .. })));
}

#[derive(Debug, Clone)]
enum Command {
    AddWall(f64, f64, f64),
    AddDoor(f64),
    AddFloor,
    Thicken(f64),
    RemoveLastWall,
    ToggleUnits,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (-20.0f64..20.0, -20.0f64..20.0, 1.0f64..15.0)
            .prop_map(|(x, y, len)| Command::AddWall(x, y, len)),
        (0.0f64..10.0).prop_map(Command::AddDoor),
        Just(Command::AddFloor),
        (0.1f64..2.0).prop_map(Command::Thicken),
        Just(Command::RemoveLastWall),
        Just(Command::ToggleUnits),
    ]
}

fn run(editor: &mut EditorState, command: &Command) {
    let last_wall = editor.project().walls().last().map(|w| w.id.clone());
    match command {
        Command::AddWall(x, y, len) => {
            editor.add_wall(Point::new(*x, *y), Point::new(x + len, *y));
        }
        Command::AddDoor(offset) => {
            if let Some(wall) = last_wall {
                editor.add_opening(&wall, OpeningKind::Door, *offset);
            }
        }
        Command::AddFloor => {
            editor.add_floor(None);
        }
        Command::Thicken(thickness) => {
            if let Some(wall) = last_wall {
                editor.set_wall_thickness(&wall, *thickness);
            }
        }
        Command::RemoveLastWall => {
            if let Some(wall) = last_wall {
                editor.remove_wall(&wall);
            }
        }
        Command::ToggleUnits => {
            editor.toggle_units();
        }
    }
}

proptest! {
    #[test]
    fn prop_undo_then_redo_restores_project(
        commands in prop::collection::vec(command(), 1..12),
    ) {
        let mut editor = EditorState::new();
        for command in &commands {
            run(&mut editor, command);
            let before = editor.project().clone();
            if editor.undo() {
                prop_assert!(editor.redo());
            }
            prop_assert_eq!(editor.project(), &before);
            prop_assert!(!editor.redo());
            prop_assert_eq!(editor.project(), &before);
        }
    }
}
