// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Combat
    Attack,

    // Menu navigation
    MenuUp,
    MenuDown,
    Confirm,
    Back,

    // Meta actions
    Debug,
}

/// Which set of bindings is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    /// Playing a level
    Gameplay,
    /// Navigating a menu screen
    Menu,
    /// Bindings active in every context
    Global,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default bindings while playing a level
pub fn gameplay_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::Jump),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ArrowUp), Action::Jump),
        (InputSource::key(KeyCode::KeyJ), Action::Attack),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
    ]
}

/// Default bindings on menu screens
pub fn menu_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyW), Action::MenuUp),
        (InputSource::key(KeyCode::ArrowUp), Action::MenuUp),
        (InputSource::key(KeyCode::KeyS), Action::MenuDown),
        (InputSource::key(KeyCode::ArrowDown), Action::MenuDown),
        (InputSource::key(KeyCode::Space), Action::Confirm),
    ]
}

/// Global bindings (active on every screen)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Enter), Action::Confirm),
        (InputSource::key(KeyCode::NumpadEnter), Action::Confirm),
        (InputSource::key(KeyCode::Escape), Action::Back),
        (InputSource::key(KeyCode::F12), Action::Debug),
    ]
}

/// Defaults for a context
pub fn default_bindings(context: InputContext) -> Vec<(InputSource, Action)> {
    match context {
        InputContext::Gameplay => gameplay_bindings(),
        InputContext::Menu => menu_bindings(),
        InputContext::Global => global_bindings(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_jump_has_three_keys() {
        let jump_keys = gameplay_bindings()
            .into_iter()
            .filter(|(_, action)| *action == Action::Jump)
            .count();
        assert_eq!(jump_keys, 3);
    }

    #[test]
    fn test_attack_on_j() {
        assert!(gameplay_bindings()
            .contains(&(InputSource::key(KeyCode::KeyJ), Action::Attack)));
    }

    #[test]
    fn test_no_duplicate_inputs_per_context() {
        for context in [InputContext::Gameplay, InputContext::Menu, InputContext::Global] {
            let mut seen_sources = HashSet::new();
            for (source, _) in default_bindings(context) {
                assert!(
                    seen_sources.insert(source),
                    "Duplicate input source in {:?} bindings",
                    context
                );
            }
        }
    }

    #[test]
    fn test_global_keys_do_not_shadow_contexts() {
        let globals: HashSet<_> = global_bindings().into_iter().map(|(s, _)| s).collect();
        for (source, _) in gameplay_bindings().into_iter().chain(menu_bindings()) {
            assert!(!globals.contains(&source));
        }
    }
}
