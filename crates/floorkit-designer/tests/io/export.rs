use floorkit_designer::{
    build_preview_scene, export_glb, export_gltf, export_stl, export_svg, EditorState,
    OpeningKind, Point, SolidOptions, SvgOptions,
};

fn house() -> EditorState {
    let mut editor = EditorState::new();
    let south = editor
        .add_wall(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
        .unwrap();
    editor
        .add_wall(Point::new(10.0, 0.0), Point::new(10.0, 8.0))
        .unwrap();
    editor.add_opening(&south, OpeningKind::Door, 4.0).unwrap();
    editor.add_opening(&south, OpeningKind::Window, 0.5).unwrap();
    editor.add_floor(None).unwrap();
    editor
        .add_wall(Point::new(0.0, 0.0), Point::new(0.0, 8.0))
        .unwrap();
    editor
}

#[test]
fn test_svg_is_deterministic_and_complete() {
    let editor = house();
    let ground = editor.project().floors()[0].id.clone();
    let a = export_svg(editor.project(), &ground, &SvgOptions::default()).unwrap();
    let b = export_svg(editor.project(), &ground, &SvgOptions::default()).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with("<svg"));
    assert!(a.ends_with("</svg>"));
    // two walls, one door, one window
    assert_eq!(a.matches("<line").count(), 4);
    assert!(a.contains("#c0392b"));
    assert!(a.contains("#2e86de"));
}

#[test]
fn test_gltf_is_deterministic() {
    let editor = house();
    let options = SolidOptions::default();
    let a = export_gltf(editor.project(), &options).unwrap();
    let b = export_gltf(editor.project(), &options).unwrap();
    assert_eq!(a, b);

    let doc: serde_json::Value = serde_json::from_str(&a).unwrap();
    assert_eq!(doc["meshes"].as_array().unwrap().len(), 3);
    assert_eq!(
        doc["extensions"]["KHR_lights_punctual"]["lights"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
    let names: Vec<&str> = doc["meshes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert!(names[0].starts_with("Level 1/wall-"));
    assert!(names[2].starts_with("Level 2/wall-"));
}

#[test]
fn test_upper_floor_sits_on_lower() {
    let editor = house();
    let scene = build_preview_scene(editor.project(), &SolidOptions::default()).unwrap();
    let upper = &scene.meshes[2];
    let min_y = upper
        .positions
        .chunks(3)
        .map(|v| v[1])
        .fold(f32::INFINITY, f32::min);
    assert!((min_y - 10.0).abs() < 1e-4);
}

#[test]
fn test_glb_chunks_are_aligned() {
    let editor = house();
    let glb = export_glb(editor.project(), &SolidOptions::default()).unwrap();
    assert_eq!(&glb[0..4], b"glTF");
    let json_len = u32::from_le_bytes([glb[12], glb[13], glb[14], glb[15]]) as usize;
    assert_eq!(json_len % 4, 0);
    assert_eq!(&glb[16..20], b"JSON");
    let bin_header = 20 + json_len;
    assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
}

#[test]
fn test_stl_counts_triangles() {
    let editor = house();
    let bytes = export_stl(editor.project(), &SolidOptions::default()).unwrap();
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    assert_eq!(bytes.len(), 84 + count * 50);
    // the two plain walls are boxes of 12 triangles; the holed wall has more
    assert!(count > 36);
}

#[test]
fn test_exports_do_not_mutate_project() {
    let editor = house();
    let before = editor.project().clone();
    let _ = export_gltf(editor.project(), &SolidOptions::default()).unwrap();
    let _ = export_stl(editor.project(), &SolidOptions::default()).unwrap();
    assert_eq!(editor.project(), &before);
}
