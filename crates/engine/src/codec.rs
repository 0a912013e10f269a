//! Document codec: the store's shapes to and from portable JSON.
//!
//! This is the single data path for export, import and history snapshots.
//! Import is atomic: every record is reconstructed before the store is
//! touched, so a malformed document leaves the scene exactly as it was.

use shared::{GeometryKind, GeometryParams, SceneDocument, ShapeRecord, SketchTool, Transform};

use crate::error::CodecError;
use crate::store::{SceneStore, Shape};
use crate::factory;

/// Serialize the live shapes (lights and helpers excluded) as pretty JSON,
/// in store order. A serialization failure falls back to the empty document
/// so history snapshots always stay parseable.
pub fn serialize(store: &SceneStore) -> String {
    let doc = SceneDocument {
        objects: store.shapes().map(record_from_shape).collect(),
    };
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => json,
        Err(err) => {
            tracing::error!(error = %err, "document serialization failed");
            String::from("{\n  \"objects\": []\n}")
        }
    }
}

/// Rebuild the store's shape set from document text.
///
/// Lights and helpers survive; a default light pair is synthesized when the
/// store has none. Primitives are re-gridded with a fresh counter in
/// document order (their stored X/Z is discarded); extrusion positions are
/// kept. Every shape is dropped onto the ground at half its mesh height and
/// gets a regenerated wireframe.
pub fn deserialize(text: &str, store: &mut SceneStore) -> Result<(), CodecError> {
    let doc: SceneDocument = serde_json::from_str(text).map_err(CodecError::from_json)?;
    let shapes = reconstruct(&doc);

    if !store.has_lights() {
        store.add_default_lights();
    }
    store.replace_shapes(shapes);
    tracing::debug!(shapes = store.shape_count(), "document deserialized");
    Ok(())
}

/// Emit only the parameter fields meaningful to the record's kind.
fn sparse_params(shape: &Shape) -> GeometryParams {
    let p = &shape.params;
    match shape.kind {
        GeometryKind::Box => GeometryParams {
            width: p.width,
            height: p.height,
            depth: p.depth,
            ..GeometryParams::default()
        },
        GeometryKind::Sphere => GeometryParams {
            radius: p.radius,
            ..GeometryParams::default()
        },
        GeometryKind::Cylinder => GeometryParams {
            radius_top: p.radius_top,
            radius_bottom: p.radius_bottom,
            height: p.height,
            ..GeometryParams::default()
        },
        GeometryKind::Extrude => match shape.sketch_tool.unwrap_or(SketchTool::Rectangle) {
            SketchTool::Rectangle => GeometryParams {
                width: p.width,
                height: p.height,
                depth: p.depth,
                ..GeometryParams::default()
            },
            SketchTool::Circle => GeometryParams {
                radius: p.radius,
                depth: p.depth,
                ..GeometryParams::default()
            },
        },
        GeometryKind::Unknown => GeometryParams::default(),
    }
}

fn record_from_shape(shape: &Shape) -> ShapeRecord {
    ShapeRecord {
        name: shape.name.clone(),
        kind: shape.kind,
        position: shape.transform.position,
        rotation: shape.transform.rotation,
        scale: shape.transform.scale,
        color: shape.color,
        geometry_params: sparse_params(shape),
        sketch_tool: shape.sketch_tool,
    }
}

/// Build the full shape list for a document. Infallible by design: missing
/// parameters use per-kind fallbacks and unknown kinds degrade to a unit
/// box, so format drift never aborts an import.
fn reconstruct(doc: &SceneDocument) -> Vec<Shape> {
    let mut primitive_index = 0usize;

    doc.objects
        .iter()
        .map(|record| {
            let mut shape = Shape::build(
                record.name.clone(),
                record.kind,
                record.geometry_params,
                Transform {
                    position: record.position,
                    rotation: record.rotation,
                    scale: record.scale,
                },
                record.color,
                record.sketch_tool,
            );

            // Primitives are re-gridded in document order; extrusions keep
            // their stored position
            if record.kind.is_primitive() {
                let (x, z) = factory::grid_position(primitive_index);
                primitive_index += 1;
                shape.transform.position[0] = x;
                shape.transform.position[2] = z;
            }
            shape.center_vertically();
            shape
        })
        .collect()
}
