// Follow camera

use glam::Vec2;

/// Default fraction of the remaining distance covered each frame
pub const DEFAULT_SMOOTHING: f32 = 0.025;

/// 2D camera that trails a target
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// Offset added to the target position
    pub offset: Vec2,
    /// Lerp factor applied once per frame (1.0 = snap to target)
    pub smoothing: f32,
}

impl Camera {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            offset: Vec2::ZERO,
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Move a fraction of the way towards `target + offset`
    pub fn follow(&mut self, target: Vec2) {
        let desired = target + self.offset;
        self.position = self.position.lerp(desired, self.smoothing);
    }

    /// Jump straight to the target (used on level load)
    pub fn snap_to(&mut self, target: Vec2) {
        self.position = target + self.offset;
    }
}
