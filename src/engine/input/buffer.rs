// Input buffering so short presses are not lost between fixed updates

use super::action::Action;
use std::collections::VecDeque;

/// Maximum number of buffered inputs to store
const MAX_BUFFER_SIZE: usize = 16;

/// How long an input remains in the buffer (in frames)
const BUFFER_DURATION: u32 = 5;

/// Represents a single buffered input
#[derive(Debug, Clone, Copy)]
pub struct BufferedInput {
    pub action: Action,
    pub frames_remaining: u32,
}

impl BufferedInput {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            frames_remaining: BUFFER_DURATION,
        }
    }

    pub fn age(&mut self) {
        self.frames_remaining = self.frames_remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.frames_remaining == 0
    }
}

/// Presses waiting to be consumed by the next fixed update
///
/// A frame can render without running a fixed step; a jump pressed during
/// that frame stays here until the player controller consumes it.
#[derive(Debug)]
pub struct InputBuffer {
    buffer: VecDeque<BufferedInput>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
        }
    }

    /// Add an input to the buffer (duplicates are ignored)
    pub fn push(&mut self, action: Action) {
        if !self.has(action) {
            self.buffer.push_back(BufferedInput::new(action));

            if self.buffer.len() > MAX_BUFFER_SIZE {
                self.buffer.pop_front();
            }
        }
    }

    /// Check if an action is currently buffered
    pub fn has(&self, action: Action) -> bool {
        self.buffer.iter().any(|input| input.action == action)
    }

    /// Consume an action from the buffer if it exists
    pub fn consume(&mut self, action: Action) -> bool {
        if let Some(pos) = self.buffer.iter().position(|input| input.action == action) {
            self.buffer.remove(pos);
            true
        } else {
            false
        }
    }

    /// Age all inputs and drop expired ones. Call once per frame.
    pub fn update(&mut self) {
        for input in &mut self.buffer {
            input.age();
        }
        self.buffer.retain(|input| !input.is_expired());
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
