//! Per-frame input snapshot consumed by the simulation.

use glam::Vec2;

/// Immutable input record for one tick.
///
/// Built once per frame by [`super::KeyBindings::resolve`] (or directly by
/// tests and scripted drivers). Boolean fields are *held* state; edge
/// detection (e.g. jump presses) is done by the consumers that need it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
    pub reload: bool,
    /// Pointer movement since the last frame, in pixels
    pub look_delta: Vec2,
}

impl FrameInput {
    /// Create an input record with everything released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.move_forward as i32) - (self.move_back as i32)
    }

    /// Left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.move_right as i32) - (self.move_left as i32)
    }

    /// Check if any movement key is held.
    pub fn has_movement(&self) -> bool {
        self.forward_axis() != 0 || self.right_axis() != 0
    }

    /// Builder-style helper: hold forward.
    pub fn forward(mut self) -> Self {
        self.move_forward = true;
        self
    }

    /// Builder-style helper: hold jump.
    pub fn jumping(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Builder-style helper: hold fire.
    pub fn firing(mut self) -> Self {
        self.fire = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_movement() {
        let input = FrameInput::new();
        assert!(!input.has_movement());
        assert_eq!(input.forward_axis(), 0);
        assert_eq!(input.right_axis(), 0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = FrameInput {
            move_forward: true,
            move_back: true,
            move_left: true,
            ..Default::default()
        };
        assert_eq!(input.forward_axis(), 0);
        assert_eq!(input.right_axis(), -1);
        assert!(input.has_movement());
    }

    #[test]
    fn test_builders() {
        let input = FrameInput::new().forward().jumping();
        assert_eq!(input.forward_axis(), 1);
        assert!(input.jump);
        assert!(!input.fire);
    }
}
