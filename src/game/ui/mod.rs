// Text UI: HUD, objectives block and menu screens

mod hud;
mod menu;
mod objectives_display;

pub use hud::Hud;
pub use menu::MenuScreen;
