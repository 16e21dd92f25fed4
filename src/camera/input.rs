use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::ModifiersState;

/// Snapshot of the pointer state the editor camera navigates with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraInput {
    pub cursor: Vec2,
    pub alt_held: bool,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl CameraInput {
    pub fn new(cursor: Vec2, modifiers: ModifiersState, pressed: &[MouseButton]) -> Self {
        Self {
            cursor,
            alt_held: modifiers.alt_key(),
            left: pressed.contains(&MouseButton::Left),
            middle: pressed.contains(&MouseButton::Middle),
            right: pressed.contains(&MouseButton::Right),
        }
    }
}
