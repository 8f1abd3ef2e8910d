//! wgpu render backend for the voxel editor.
//!
//! Draws every scene mesh as an instanced unit cube with hemispheric lighting
//! and optional edge outlines. The camera is an arc-rotate orbit camera that
//! also turns cursor positions into picking rays.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Camera motion is view state only and is not recorded in the scene.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::WgpuRenderer;
