//! Input: pointer events, keyboard shortcuts and panel controls mapped to a
//! shared action vocabulary.
//!
//! # Invariants
//! - The editor consumes `Action`s, never raw window events.
//! - Active markers are derived from editor state, never stored separately.

pub mod action;
pub mod controls;
pub mod pointer;

pub use action::{Action, shortcut};
pub use controls::{ColorControl, ToolButton};
pub use pointer::{PointerButton, PointerEvent, PointerPhase};
