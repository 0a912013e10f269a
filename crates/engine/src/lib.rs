//! Scene document engine for an interactive 3D editor.
//!
//! The engine owns the authoritative in-memory scene ([`store::SceneStore`]),
//! resolves pointer rays to shape/face/edge selections ([`picking::Picker`]),
//! converts the scene to and from its portable JSON document form
//! ([`codec`]), and provides snapshot-based undo/redo ([`history::History`]).
//! [`editor::Editor`] wires these together into the operation surface a
//! presentation layer calls; rendering, camera control and event plumbing
//! live outside this crate.

pub mod codec;
pub mod editor;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod history;
pub mod mesh;
pub mod picking;
pub mod sketch;
pub mod store;

pub use editor::Editor;
pub use error::CodecError;
pub use geometry::Ray;
pub use picking::SelectionInfo;
