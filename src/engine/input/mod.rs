// Input handling system
//
// Keyboard and mouse input for the single local player, with buffering,
// context-dependent bindings (gameplay vs. menus) and a smoothed movement axis.
//
// - `action`: game actions, input contexts and default bindings
// - `buffer`: presses kept alive until a fixed update consumes them
// - `player`: pressed / just-pressed state and the horizontal axis
// - `config`: rebindable binding sets
// - `manager`: winit event translation

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;
pub mod player;

pub use action::{Action, InputContext};
pub use manager::InputManager;
pub use player::PlayerInput;
