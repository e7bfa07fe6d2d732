use glam::Vec2;
use honeybear_render::OrbitControls;

/// A high-level action produced from keyboard or pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Enter or leave borderless fullscreen.
    ToggleFullscreen,
    /// Orbit the camera by a pointer drag, in pixels.
    Orbit(Vec2),
    /// Pan the camera by a pointer drag, in pixels.
    Pan(Vec2),
    /// Wheel movement. Negative values move the camera closer.
    Dolly(f32),
}

/// Map a logical key (the character the key produces) to an action.
/// Only a lowercase `f` is bound.
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "f" => Some(Action::ToggleFullscreen),
        _ => None,
    }
}

impl Action {
    /// Feed camera actions into the orbit controls. Returns false for actions
    /// the camera does not handle.
    pub fn apply_to(self, controls: &mut OrbitControls, viewport_height: f32) -> bool {
        match self {
            Action::Orbit(delta) => controls.rotate(delta, viewport_height),
            Action::Pan(delta) => controls.pan(delta, viewport_height),
            Action::Dolly(scroll) => controls.dolly(scroll),
            Action::ToggleFullscreen => return false,
        }
        true
    }
}
