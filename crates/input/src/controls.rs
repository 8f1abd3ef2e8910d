//! Panel controls. Each control knows the action it emits and derives its
//! active marker from the current editor state, so a click changes both in
//! one step.

use crate::action::Action;
use voxedit_common::{Color, ColorChoice, Mode};

/// A button in the tool panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolButton {
    Mode(Mode),
    /// Bulk clear; an action, not a mode, so it is never marked active.
    Clear,
}

impl ToolButton {
    pub const ALL: [ToolButton; 4] = [
        ToolButton::Mode(Mode::Create),
        ToolButton::Mode(Mode::Delete),
        ToolButton::Mode(Mode::Paint),
        ToolButton::Clear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolButton::Mode(mode) => mode.label(),
            ToolButton::Clear => "Clear",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            ToolButton::Mode(mode) => Action::SelectMode(*mode),
            ToolButton::Clear => Action::Clear,
        }
    }

    pub fn is_active(&self, current: Mode) -> bool {
        matches!(self, ToolButton::Mode(mode) if *mode == current)
    }
}

/// A control in the colour panel: the random toggle or one palette swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorControl {
    Random,
    Swatch(Color),
}

impl ColorControl {
    /// Random first, then one swatch per palette entry.
    pub fn all(palette: &[Color]) -> Vec<ColorControl> {
        std::iter::once(ColorControl::Random)
            .chain(palette.iter().copied().map(ColorControl::Swatch))
            .collect()
    }

    pub fn action(&self) -> Action {
        match self {
            ColorControl::Random => Action::SelectColor(ColorChoice::Random),
            ColorControl::Swatch(color) => Action::SelectColor(ColorChoice::Fixed(*color)),
        }
    }

    pub fn is_active(&self, current: ColorChoice) -> bool {
        match (self, current) {
            (ColorControl::Random, ColorChoice::Random) => true,
            (ColorControl::Swatch(a), ColorChoice::Fixed(b)) => *a == b,
            _ => false,
        }
    }
}
