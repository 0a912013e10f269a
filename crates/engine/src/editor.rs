//! The operation surface consumed by the presentation layer.
//!
//! Every mutating operation runs to completion synchronously and commits a
//! history snapshot when it changes the document; previews and picks never
//! snapshot. The editor owns the store, the picker and the sketch state —
//! rendering and event plumbing stay outside.

use shared::{GeometryKind, SketchTool};

use crate::codec;
use crate::error::CodecError;
use crate::factory::{self, DEFAULT_EXTRUDE_DEPTH};
use crate::geometry::Ray;
use crate::history::History;
use crate::picking::{Picker, SelectionInfo};
use crate::sketch::{self, SketchState};
use crate::store::{Helper, HelperKind, SceneStore, Shape, SKETCH_PREVIEW};

pub struct Editor {
    pub store: SceneStore,
    pub history: History,
    pub picker: Picker,
    sketch: SketchState,
}

impl Editor {
    /// Fresh scene with the default grid and lights; the base history
    /// snapshot is recorded immediately.
    pub fn new() -> Self {
        let store = SceneStore::with_defaults();
        let mut history = History::new();
        history.snapshot(&store);
        Self {
            store,
            history,
            picker: Picker::new(),
            sketch: SketchState::default(),
        }
    }

    // ── Shape creation ────────────────────────────────────────

    /// Add a primitive on the next grid slot and snapshot. Returns the
    /// generated shape name.
    pub fn add_primitive(&mut self, kind: GeometryKind) -> String {
        let name = self.store.add_primitive(kind);
        tracing::debug!(shape = %name, "primitive added");
        self.history.snapshot(&self.store);
        name
    }

    // ── Sketching ─────────────────────────────────────────────

    /// Arm sketch mode with a tool. Any half-drawn stroke is dropped.
    pub fn begin_sketch(&mut self, tool: SketchTool) {
        self.store.remove_helper(SKETCH_PREVIEW);
        self.sketch.begin(tool);
    }

    /// Ground-plane pointer sample: the first call anchors the stroke,
    /// later calls reshape the preview overlay. Never snapshots.
    pub fn sketch_move(&mut self, x: f64, z: f64) {
        let Some(tool) = self.sketch.active_tool() else {
            return;
        };
        let point = (factory::snap_to_grid(x), factory::snap_to_grid(z));
        let start = self.sketch.anchor_or_set(point);

        self.store.upsert_helper(Helper {
            name: SKETCH_PREVIEW.to_string(),
            kind: HelperKind::SketchPreview {
                outline: sketch::preview_outline(tool, start, point),
                color: sketch::preview_color(tool),
            },
        });
    }

    /// Finish the stroke at a ground-plane point: the preview is removed, a
    /// permanent extrusion is created at the anchor, and a snapshot is
    /// taken. No-op when no stroke was started.
    pub fn commit_sketch(&mut self, x: f64, z: f64) -> Option<String> {
        let end = (factory::snap_to_grid(x), factory::snap_to_grid(z));
        let (tool, start) = self.sketch.take_stroke()?;
        self.store.remove_helper(SKETCH_PREVIEW);

        let name = match tool {
            SketchTool::Rectangle => "extrude-rectangle",
            SketchTool::Circle => "extrude-circle",
        };
        let shape = factory::create_extrusion(name, tool, start, end, DEFAULT_EXTRUDE_DEPTH);
        self.store.add_shape(shape);
        tracing::debug!(shape = name, "sketch extrusion committed");
        self.history.snapshot(&self.store);
        Some(name.to_string())
    }

    /// Leave sketch mode, discarding any stroke and preview.
    pub fn cancel_sketch(&mut self) {
        self.store.remove_helper(SKETCH_PREVIEW);
        self.sketch.cancel();
    }

    // ── Document I/O ──────────────────────────────────────────

    /// Serialize the current document.
    pub fn export_document(&self) -> String {
        codec::serialize(&self.store)
    }

    /// Replace the document from text and snapshot. A malformed document
    /// reports the failure and leaves scene and history untouched.
    pub fn import_document(&mut self, text: &str) -> Result<(), CodecError> {
        match codec::deserialize(text, &mut self.store) {
            Ok(()) => {
                tracing::info!(shapes = self.store.shape_count(), "document imported");
                self.picker.clear(&mut self.store);
                self.history.snapshot(&self.store);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "document import failed");
                Err(err)
            }
        }
    }

    // ── History ───────────────────────────────────────────────

    /// Undo the last committed mutation. Returns false when only the base
    /// state remains.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.store) {
            Ok(changed) => {
                if changed {
                    self.picker.clear(&mut self.store);
                }
                changed
            }
            Err(err) => {
                tracing::error!(error = %err, "undo failed to restore snapshot");
                false
            }
        }
    }

    /// Redo the most recently undone mutation.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.store) {
            Ok(changed) => {
                if changed {
                    self.picker.clear(&mut self.store);
                }
                changed
            }
            Err(err) => {
                tracing::error!(error = %err, "redo failed to restore snapshot");
                false
            }
        }
    }

    // ── Picking ───────────────────────────────────────────────

    /// Resolve a pointer ray to a selection, replacing the highlight.
    pub fn pick(&mut self, ray: &Ray) -> Option<SelectionInfo> {
        self.picker.pick(&mut self.store, ray)
    }

    pub fn selection(&self) -> Option<&SelectionInfo> {
        self.picker.selection()
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn shape_count(&self) -> usize {
        self.store.shape_count()
    }

    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.store.shape(name)
    }

    pub fn shape_mut(&mut self, name: &str) -> Option<&mut Shape> {
        self.store.shape_mut(name)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
