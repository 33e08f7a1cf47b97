// Input state for the local player

use super::action::Action;
use super::buffer::InputBuffer;
use crate::core::math::move_towards;
use std::collections::HashSet;

/// Units per second the horizontal axis moves towards a held direction
pub const AXIS_SENSITIVITY: f32 = 3.0;

/// Units per second the horizontal axis falls back to zero when released
pub const AXIS_GRAVITY: f32 = 3.0;

/// Represents the input state of the player
#[derive(Debug)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous frame
    previous_pressed: HashSet<Action>,

    /// Input buffer for presses that land between fixed updates
    buffer: InputBuffer,

    /// Smoothed horizontal axis in -1..=1
    horizontal: f32,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            previous_pressed: HashSet::new(),
            buffer: InputBuffer::new(),
            horizontal: 0.0,
        }
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Consume a buffered press. Returns true at most once per press.
    pub fn consume_buffered(&mut self, action: Action) -> bool {
        self.buffer.consume(action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
            self.buffer.push(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Update input state for a new frame
    /// Call this once per frame after the frame's updates ran
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed = self.pressed.clone();
        self.buffer.update();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
        self.buffer.clear();
        self.horizontal = 0.0;
    }

    /// Raw horizontal direction from the held keys (-1, 0 or 1)
    pub fn raw_horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }

    /// Advance the smoothed horizontal axis by `dt`
    ///
    /// The axis ramps towards the held direction, decays to zero when nothing
    /// is held, and snaps to zero first when the direction reverses.
    pub fn update_axis(&mut self, dt: f32) {
        let target = self.raw_horizontal();

        if target != 0.0 && self.horizontal != 0.0 && target.signum() != self.horizontal.signum() {
            self.horizontal = 0.0;
        }

        self.horizontal = if target != 0.0 {
            move_towards(self.horizontal, target, AXIS_SENSITIVITY * dt)
        } else {
            move_towards(self.horizontal, 0.0, AXIS_GRAVITY * dt)
        };
    }

    /// Smoothed horizontal axis in -1..=1
    pub fn horizontal_axis(&self) -> f32 {
        self.horizontal
    }
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self::new()
    }
}
