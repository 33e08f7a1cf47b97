// Game layer: player, enemies, pickups, props, rules, levels and menus

pub mod collectables;
pub mod director;
pub mod enemies;
pub mod level;
pub mod objectives;
pub mod player;
pub mod props;
pub mod rules;
pub mod scene;
pub mod session;
pub mod ui;

pub use director::{Flow, Game};
