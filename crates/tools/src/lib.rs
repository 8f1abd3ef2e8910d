//! Developer tooling: read-only inspection of the scene and the editor.
//!
//! # Invariants
//! - Tools never mutate the scene or the registry.

mod inspector;

pub use inspector::{EditorSummary, ObjectInfo, SceneInspector};

pub fn crate_info() -> &'static str {
    "voxedit-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
