//! Scene substrate: owns every box mesh, its material and edge decoration,
//! and resolves rays to the nearest mesh face.
//!
//! # Invariants
//! - The scene is the sole owner of meshes; callers hold `ObjectId`s only.
//! - Every mutation appends a `SceneEvent`.
//! - Picking never mutates the scene.

pub mod pick;
pub mod scene;

pub use pick::{PickHit, Ray};
pub use scene::{EdgeStyle, Material, Mesh, Scene, SceneEvent};
