// Engine modules: physics, input, animation, timing, camera

pub mod animation;
pub mod camera;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod timers;
