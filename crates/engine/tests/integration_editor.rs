//! Integration tests for the editor facade: grid placement, sketching and
//! history semantics over the full public surface.

use cadedit_engine::Editor;
use shared::{GeometryKind, SketchTool};

#[test]
fn test_grid_placement_is_deterministic() {
    let mut e = Editor::new();
    let mut names = Vec::new();
    for _ in 0..6 {
        names.push(e.add_primitive(GeometryKind::Box));
    }

    // i-th primitive: x = (i mod 5)*2.5 - 5, z = floor(i/5)*2.5 - 5
    let first = e.shape(&names[0]).unwrap();
    assert_eq!(first.transform.position, [-5.0, 0.5, -5.0]);

    let third = e.shape(&names[2]).unwrap();
    assert_eq!(third.transform.position, [0.0, 0.5, -5.0]);

    let sixth = e.shape(&names[5]).unwrap();
    assert_eq!(sixth.transform.position, [-5.0, 0.5, -2.5]);
}

#[test]
fn test_mixed_primitives_share_one_counter() {
    let mut e = Editor::new();
    e.add_primitive(GeometryKind::Box);
    e.add_primitive(GeometryKind::Sphere);
    let cyl = e.add_primitive(GeometryKind::Cylinder);

    let s = e.shape(&cyl).unwrap();
    assert_eq!(s.transform.position, [0.0, 0.5, -5.0]);
}

#[test]
fn test_undo_redo_duality() {
    let mut e = Editor::new();
    let base = e.export_document();

    e.add_primitive(GeometryKind::Box);
    e.add_primitive(GeometryKind::Sphere);
    e.add_primitive(GeometryKind::Cylinder);
    let final_state = e.export_document();

    for _ in 0..3 {
        assert!(e.undo());
    }
    assert_eq!(e.export_document(), base);
    assert!(!e.undo(), "base state must not be undoable");

    for _ in 0..3 {
        assert!(e.redo());
    }
    assert_eq!(e.export_document(), final_state);
    assert!(!e.redo(), "nothing left to redo");
}

#[test]
fn test_snapshot_after_undo_clears_redo() {
    let mut e = Editor::new();
    e.add_primitive(GeometryKind::Box);
    e.add_primitive(GeometryKind::Sphere);

    assert!(e.undo());
    // A new committed mutation invalidates the redo branch
    e.add_primitive(GeometryKind::Cylinder);
    assert!(!e.redo());
    assert_eq!(e.shape_count(), 2);
}

#[test]
fn test_undo_covers_sketch_commits() {
    let mut e = Editor::new();
    e.begin_sketch(SketchTool::Circle);
    e.sketch_move(0.0, 0.0);
    e.commit_sketch(1.5, 0.0).unwrap();
    assert_eq!(e.shape_count(), 1);

    assert!(e.undo());
    assert_eq!(e.shape_count(), 0);
    assert!(e.redo());
    assert_eq!(e.shape_count(), 1);
    let s = e.shape("extrude-circle").unwrap();
    assert_eq!(s.params.radius, Some(1.5));
}

#[test]
fn test_import_failure_isolation_is_byte_exact() {
    let mut e = Editor::new();
    e.add_primitive(GeometryKind::Box);
    e.begin_sketch(SketchTool::Rectangle);
    e.sketch_move(0.0, 0.0);
    e.commit_sketch(1.0, 2.0);

    let before = e.export_document();

    assert!(e.import_document("{ \"objects\": ").is_err());
    assert_eq!(e.export_document(), before);

    assert!(e.import_document("[1, 2, 3]").is_err());
    assert_eq!(e.export_document(), before);
}

#[test]
fn test_import_replaces_document_and_snapshots() {
    let mut source = Editor::new();
    source.add_primitive(GeometryKind::Sphere);
    let doc = source.export_document();

    let mut e = Editor::new();
    e.add_primitive(GeometryKind::Box);
    e.add_primitive(GeometryKind::Box);

    e.import_document(&doc).unwrap();
    assert_eq!(e.shape_count(), 1);
    assert!(e.shape("sphere-1").is_some());

    // The import itself is undoable
    assert!(e.undo());
    assert_eq!(e.shape_count(), 2);
}

#[test]
fn test_sketch_preview_never_persists() {
    let mut e = Editor::new();
    e.begin_sketch(SketchTool::Rectangle);
    e.sketch_move(0.0, 0.0);
    e.sketch_move(2.0, 2.0);

    // A half-drawn stroke leaves no trace in the document
    let doc = e.export_document();
    let parsed: shared::SceneDocument = serde_json::from_str(&doc).unwrap();
    assert!(parsed.objects.is_empty());
}
