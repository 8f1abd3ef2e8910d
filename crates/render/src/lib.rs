//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate the scene.
//! - Render output derives from scene state and view only.
//!
//! The text renderers here back the CLI and tests; the GPU backend lives in
//! `voxedit-render-wgpu`.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer, TopDownRenderer};

pub fn crate_info() -> &'static str {
    "voxedit-render v0.1.0"
}
