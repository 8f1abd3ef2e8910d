//! Voxel authoring: grid generation, the cube registry, and the state machine
//! that turns picks into create/delete/paint mutations.
//!
//! # Invariants
//! - A cube appears in the registry at most once.
//! - A registry entry is removed exactly when its cube leaves the scene.
//! - Colours are resolved when a cube is created or painted, never later.

pub mod editor;
pub mod grid;
pub mod palette;
pub mod registry;

pub use editor::{ClearReport, EditOutcome, Editor, EditorSettings, EditorState};
pub use grid::{GridCell, GridSpec};
pub use palette::Palette;
pub use registry::{CubeEntry, CubeRegistry};

pub fn crate_info() -> &'static str {
    "voxedit-author v0.1.0"
}
