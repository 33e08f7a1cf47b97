// Input manager - translates winit events into player actions

use super::action::{Action, InputContext, InputSource};
use super::config::InputConfigManager;
use super::player::PlayerInput;
use log::debug;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Main input manager: owns the bindings and the player's input state
pub struct InputManager {
    config: InputConfigManager,
    player: PlayerInput,
    context: InputContext,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            config: InputConfigManager::new(),
            player: PlayerInput::new(),
            context: InputContext::Menu,
        }
    }

    /// Switch the active binding set. Held keys are dropped so a press made
    /// under one context is never released under another.
    pub fn set_context(&mut self, context: InputContext) {
        if self.context != context {
            debug!("Input context {:?} -> {:?}", self.context, context);
            self.context = context;
            self.player.reset();
        }
    }

    pub fn context(&self) -> InputContext {
        self.context
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state, false);
    }

    fn process_source(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.config.get_action(self.context, source) else {
            return;
        };

        match state {
            ElementState::Pressed if !repeat => self.player.press(action),
            ElementState::Pressed => {}
            ElementState::Released => self.player.release(action),
        }
    }

    /// Update the player input state for a new frame
    /// Call this once per frame after processing all events
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    pub fn config(&self) -> &InputConfigManager {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfigManager {
        &mut self.config
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
