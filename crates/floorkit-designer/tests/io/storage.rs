use floorkit_designer::{EditorState, Point};
use floorkit_settings::LocalStorage;

#[test]
fn test_local_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path(), "floorkit-project");

    let mut editor = EditorState::new();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(5.0, 5.0))
        .unwrap();
    assert!(editor.save_local(&storage));

    let mut restored = EditorState::new();
    assert!(restored.load_local(&storage));
    assert_eq!(restored.project(), editor.project());
    assert!(!restored.can_undo());
}

#[test]
fn test_empty_slot_keeps_project() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path(), "empty");
    let mut editor = EditorState::new();
    let before = editor.project().clone();
    assert!(!editor.load_local(&storage));
    assert_eq!(editor.project(), &before);
}

#[test]
fn test_garbage_slot_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path(), "garbage");
    storage.save("{\"floors\": 3}").unwrap();

    let mut editor = EditorState::new();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
        .unwrap();
    assert!(!editor.load_local(&storage));
    assert_eq!(editor.project().walls().len(), 1);
    assert!(editor.can_undo());
}
