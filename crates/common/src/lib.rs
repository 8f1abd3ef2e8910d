//! Shared types for the voxel editor: object handles, colours, tool modes and
//! the editor configuration file.
//!
//! # Invariants
//! - `ObjectId` ordering equals creation order.
//! - `Color` round-trips through its `#RRGGBB` form.

pub mod config;
pub mod types;

pub use config::{CameraConfig, ConfigError, EditorConfig, LightingConfig};
pub use types::{Color, ColorChoice, ColorError, Mode, ObjectId};
