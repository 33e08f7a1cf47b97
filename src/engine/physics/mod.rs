// Physics system using rapier2d

pub mod body;
mod collision;
mod command;
pub mod probe;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use command::{BodyCommand, BodyMode};
pub use probe::{Probe, WorldProbe};
pub use world::PhysicsWorld;
