//! Snapshot-based undo/redo over the document codec.
//!
//! Each stack entry is a full serialized document. O(document size) per
//! snapshot is a deliberate simplicity tradeoff; this engine does not
//! target very large documents.

use crate::codec;
use crate::error::CodecError;
use crate::store::SceneStore;

/// Two stacks of document snapshots. The caller records a base snapshot
/// right after constructing the store; that base is never popped, so once
/// initialized the undo stack always holds at least one entry.
#[derive(Default)]
pub struct History {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current store. Invoked by the caller after every
    /// committed mutation; clears the redo stack.
    pub fn snapshot(&mut self, store: &SceneStore) {
        self.undo_stack.push(codec::serialize(store));
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restore the state beneath the current snapshot. Returns `Ok(false)`
    /// when only the base state remains (silent no-op). The store is
    /// restored before the stacks move, so a failed restore changes
    /// nothing.
    pub fn undo(&mut self, store: &mut SceneStore) -> Result<bool, CodecError> {
        if !self.can_undo() {
            return Ok(false);
        }

        let previous = self.undo_stack.len() - 2;
        codec::deserialize(&self.undo_stack[previous], store)?;

        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }
        tracing::debug!(depth = self.undo_stack.len(), "undo");
        Ok(true)
    }

    /// Reapply the most recently undone snapshot. Returns `Ok(false)` when
    /// there is nothing to redo.
    pub fn redo(&mut self, store: &mut SceneStore) -> Result<bool, CodecError> {
        let Some(next) = self.redo_stack.pop() else {
            return Ok(false);
        };

        match codec::deserialize(&next, store) {
            Ok(()) => {
                self.undo_stack.push(next);
                tracing::debug!(depth = self.undo_stack.len(), "redo");
                Ok(true)
            }
            Err(err) => {
                self.redo_stack.push(next);
                Err(err)
            }
        }
    }

    /// Number of retained snapshots (base included)
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }
}
