use crate::action::Action;
use glam::Vec2;
use voxedit_scene::Ray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Up,
}

/// A button transition at a cursor position, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub button: PointerButton,
    pub position: Vec2,
}

impl PointerEvent {
    /// Map to an action. Only a primary-button press picks; `cast` turns the
    /// cursor position into a world ray and is only called in that case.
    pub fn into_action(self, cast: impl FnOnce(Vec2) -> Ray) -> Action {
        match (self.phase, self.button) {
            (PointerPhase::Down, PointerButton::Primary) => Action::Pick(cast(self.position)),
            _ => Action::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn cast(p: Vec2) -> Ray {
        Ray::new(Vec3::new(p.x, 10.0, p.y), Vec3::NEG_Y)
    }

    #[test]
    fn primary_down_picks() {
        let event = PointerEvent {
            phase: PointerPhase::Down,
            button: PointerButton::Primary,
            position: Vec2::new(3.0, 4.0),
        };
        match event.into_action(cast) {
            Action::Pick(ray) => assert_eq!(ray.origin, Vec3::new(3.0, 10.0, 4.0)),
            other => panic!("expected pick, got {other:?}"),
        }
    }

    #[test]
    fn other_buttons_and_release_are_ignored() {
        let ignored = [
            (PointerPhase::Up, PointerButton::Primary),
            (PointerPhase::Down, PointerButton::Secondary),
            (PointerPhase::Down, PointerButton::Middle),
            (PointerPhase::Down, PointerButton::Other(4)),
        ];
        for (phase, button) in ignored {
            let event = PointerEvent {
                phase,
                button,
                position: Vec2::ZERO,
            };
            let action = event.into_action(|_| panic!("cast must not run"));
            assert_eq!(action, Action::Noop);
        }
    }
}
