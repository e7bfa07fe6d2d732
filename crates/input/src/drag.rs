use crate::action::Action;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Turns button presses and cursor motion into orbit, pan and dolly actions.
#[derive(Debug, Default, Clone)]
pub struct DragTracker {
    held: Option<PointerButton>,
    last: Option<Vec2>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag. A second button pressed mid-drag is ignored.
    pub fn press(&mut self, button: PointerButton) {
        if self.held.is_none() {
            tracing::trace!(?button, "drag started");
            self.held = Some(button);
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.held == Some(button) {
            self.held = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.held.is_some()
    }

    /// Cursor moved to `position`. Yields an action while a button is held.
    pub fn moved(&mut self, position: Vec2) -> Option<Action> {
        let previous = self.last.replace(position)?;
        let delta = position - previous;
        if delta == Vec2::ZERO {
            return None;
        }
        match self.held? {
            PointerButton::Primary => Some(Action::Orbit(delta)),
            PointerButton::Secondary => Some(Action::Pan(delta)),
            // Dragging down moves away, like scrolling toward the user.
            PointerButton::Middle => Some(Action::Dolly(delta.y)),
        }
    }

    /// Cursor left the window; the next motion starts fresh.
    pub fn left(&mut self) {
        self.last = None;
        self.held = None;
    }

    pub fn wheel(&self, delta_y: f32) -> Option<Action> {
        (delta_y != 0.0).then_some(Action::Dolly(delta_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_without_button_is_ignored() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.moved(Vec2::new(10.0, 10.0)), None);
        assert_eq!(drag.moved(Vec2::new(20.0, 10.0)), None);
    }

    #[test]
    fn primary_drag_orbits_by_delta() {
        let mut drag = DragTracker::new();
        drag.moved(Vec2::new(10.0, 10.0));
        drag.press(PointerButton::Primary);
        assert_eq!(
            drag.moved(Vec2::new(15.0, 7.0)),
            Some(Action::Orbit(Vec2::new(5.0, -3.0)))
        );
        drag.release(PointerButton::Primary);
        assert!(!drag.is_dragging());
        assert_eq!(drag.moved(Vec2::new(20.0, 7.0)), None);
    }

    #[test]
    fn secondary_drag_pans() {
        let mut drag = DragTracker::new();
        drag.moved(Vec2::ZERO);
        drag.press(PointerButton::Secondary);
        assert_eq!(
            drag.moved(Vec2::new(0.0, 4.0)),
            Some(Action::Pan(Vec2::new(0.0, 4.0)))
        );
    }

    #[test]
    fn first_button_wins() {
        let mut drag = DragTracker::new();
        drag.moved(Vec2::ZERO);
        drag.press(PointerButton::Primary);
        drag.press(PointerButton::Secondary);
        drag.release(PointerButton::Secondary);
        assert!(drag.is_dragging());
        assert!(matches!(drag.moved(Vec2::X), Some(Action::Orbit(_))));
    }

    #[test]
    fn leaving_resets_state() {
        let mut drag = DragTracker::new();
        drag.moved(Vec2::ZERO);
        drag.press(PointerButton::Primary);
        drag.left();
        assert!(!drag.is_dragging());
        assert_eq!(drag.moved(Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    fn wheel_maps_to_dolly() {
        let drag = DragTracker::new();
        assert_eq!(drag.wheel(-1.0), Some(Action::Dolly(-1.0)));
        assert_eq!(drag.wheel(0.0), None);
    }
}
