use floorkit_core::DocumentError;
use floorkit_designer::{
    project_from_json, project_to_json, EditorState, OpeningKind, Point, Project, ProjectDocument,
    Selection,
};

fn sample_editor() -> EditorState {
    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    editor.add_opening(&wall, OpeningKind::Door, 2.0).unwrap();
    editor.add_floor(Some("Attic")).unwrap();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(0.0, 6.0))
        .unwrap();
    editor
}

#[test]
fn test_document_round_trip_preserves_project() {
    let editor = sample_editor();
    let json = editor.export_json().unwrap();
    let restored = project_from_json(&json).unwrap();
    assert_eq!(&restored, editor.project());
}

#[test]
fn test_import_is_one_undo_step() {
    let source = sample_editor();
    let json = source.export_json().unwrap();

    let mut editor = EditorState::new();
    let wall = editor
        .add_wall(Point::new(1.0, 1.0), Point::new(2.0, 1.0))
        .unwrap();
    editor.select(Selection::Wall(wall.clone()));
    editor.import_json(&json).unwrap();

    assert_eq!(editor.project(), source.project());
    assert!(editor.selection().is_none());
    assert!(editor.undo());
    assert!(editor.project().wall(&wall).is_some());
}

#[test]
fn test_corrupt_import_leaves_project_untouched() {
    let mut editor = sample_editor();
    let before = editor.project().clone();
    let depth = editor.history().undo_depth();

    assert!(matches!(
        editor.import_json("{ not json"),
        Err(DocumentError::Parse(_))
    ));

    // well-formed but the opening overhangs its wall
    let mut doc = ProjectDocument::from_project(&before);
    doc.openings[0].offset = 9.0;
    let bad = serde_json::to_string(&doc).unwrap();
    assert!(matches!(
        editor.import_json(&bad),
        Err(DocumentError::Invalid { .. })
    ));

    assert_eq!(editor.project(), &before);
    assert_eq!(editor.history().undo_depth(), depth);
}

#[test]
fn test_missing_units_default_to_imperial() {
    let project = Project::new();
    let mut value: serde_json::Value =
        serde_json::from_str(&project_to_json(&project).unwrap()).unwrap();
    value.as_object_mut().unwrap().remove("units");
    let restored = project_from_json(&value.to_string()).unwrap();
    assert_eq!(restored.units(), floorkit_core::Units::Imperial);
}

#[test]
fn test_file_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    let editor = sample_editor();
    editor.save_to_file(&path).unwrap();

    let mut other = EditorState::new();
    other.load_from_file(&path).unwrap();
    assert_eq!(other.project(), editor.project());
    assert!(!other.can_undo());

    assert!(other.load_from_file(dir.path().join("missing.json")).is_err());
}
