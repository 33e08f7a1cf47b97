// Deferred body mutations produced by game logic and applied to the physics world

use glam::Vec2;

/// How a body is driven by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Affected by gravity, impulses and contacts
    Dynamic,
    /// Moved only by explicit position updates
    Kinematic,
    /// Never moves
    Fixed,
}

/// A single change requested for a body or its collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyCommand {
    /// Move by an offset, ignoring velocity
    Translate(Vec2),
    /// Teleport to a position
    SetPosition(Vec2),
    SetVelocity(Vec2),
    SetVelocityX(f32),
    SetVelocityY(f32),
    /// Instant change of momentum
    Impulse(Vec2),
    SetMode(BodyMode),
    SetColliderEnabled(bool),
    /// Replace the box collider's half extents
    ResizeBox(Vec2),
    /// Rotation in degrees
    SetRotation(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_compare_by_value() {
        assert_eq!(
            BodyCommand::Impulse(Vec2::new(0.0, 7.0)),
            BodyCommand::Impulse(Vec2::new(0.0, 7.0))
        );
        assert_ne!(BodyCommand::SetVelocityX(1.0), BodyCommand::SetVelocityY(1.0));
    }
}
