use voxedit_common::{ColorChoice, Mode};
use voxedit_scene::Ray;

/// A high-level action produced by the pointer, keyboard or UI panels.
///
/// The editor consumes actions, never raw input events, so the desktop app
/// and scripted runs share the same dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch the active tool.
    SelectMode(Mode),
    /// Switch the colour used for new and repainted cubes.
    SelectColor(ColorChoice),
    /// Remove everything above the base layer.
    Clear,
    /// Primary-button press: resolve the ray and apply the active tool.
    Pick(Ray),
    /// No-op (used for input that is not bound).
    Noop,
}

/// Keyboard shortcut for a key, as typed.
///
/// `1`/`2`/`3` select Create/Delete/Paint, `c` clears, `r` returns to random
/// colours.
pub fn shortcut(key: char) -> Action {
    match key.to_ascii_lowercase() {
        '1' => Action::SelectMode(Mode::Create),
        '2' => Action::SelectMode(Mode::Delete),
        '3' => Action::SelectMode(Mode::Paint),
        'c' => Action::Clear,
        'r' => Action::SelectColor(ColorChoice::Random),
        _ => Action::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn pick_carries_ray() {
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let a = Action::Pick(ray);
        assert!(matches!(a, Action::Pick(r) if r.origin == Vec3::Y));
    }

    #[test]
    fn mode_shortcuts() {
        assert_eq!(shortcut('1'), Action::SelectMode(Mode::Create));
        assert_eq!(shortcut('2'), Action::SelectMode(Mode::Delete));
        assert_eq!(shortcut('3'), Action::SelectMode(Mode::Paint));
    }

    #[test]
    fn clear_and_random_shortcuts_ignore_case() {
        assert_eq!(shortcut('c'), Action::Clear);
        assert_eq!(shortcut('C'), Action::Clear);
        assert_eq!(shortcut('R'), Action::SelectColor(ColorChoice::Random));
    }

    #[test]
    fn unbound_key_is_noop() {
        assert_eq!(shortcut('x'), Action::Noop);
    }
}
