use thiserror::Error;

/// Recoverable failures of the document codec.
///
/// Everything else in the engine's failure taxonomy is a value, not an
/// error: an unknown geometry kind degrades to a default box, a pick miss
/// is `None`, and undo/redo underflow is a silent no-op.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed document text
    #[error("document parse failed: {0}")]
    Parse(String),
    /// Structurally valid text missing or mistyping a required field
    #[error("document schema invalid: {0}")]
    Schema(String),
}

impl CodecError {
    /// Classify a serde_json failure: syntax-level problems are parse
    /// errors, data-level problems are schema errors.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => Self::Schema(err.to_string()),
            _ => Self::Parse(err.to_string()),
        }
    }
}
