// Saw blades: spinning hazards that follow a scripted path

use std::f32::consts::TAU;

use glam::Vec2;

use super::{ContactOutcome, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::engine::physics::{BodyCommand, CollisionGroups, Probe};
use crate::game::player::PlayerView;

pub const RADIUS: f32 = 0.45;

/// Reach of the rays that keep a half saw on its floor or wall
const SURFACE_PROBE: f32 = 0.5;
/// Spin rate in degrees per second per unit of speed
const SPIN_RATE: f32 = 100.0;

/// How a saw moves
#[derive(Debug, Clone, PartialEq)]
pub enum SawPath {
    /// Circle of `range` around the spawn point
    Circular,
    /// Back and forth along x within `range`
    Horizontal,
    /// Back and forth along y within `range`
    Vertical,
    /// Half saw embedded in a floor; turns at `range` or where the floor ends
    FloorHorizontal,
    /// Half saw embedded in a wall; turns at `range` or where the wall ends
    WallVertical,
    /// Half saw circling `center` (spawn point when `None`)
    Orbit { center: Option<Vec2>, radius: f32 },
    /// Half saw running around a rectangle centered on `center`
    Square {
        center: Option<Vec2>,
        width: f32,
        height: f32,
        /// Turn the blade to face outward on each side
        rotate: bool,
    },
}

impl SawPath {
    /// Paths run by the embedded half saw
    pub fn is_half_saw(&self) -> bool {
        !matches!(self, Self::Circular | Self::Horizontal | Self::Vertical)
    }
}

#[derive(Debug, Clone)]
pub struct SawConfig {
    pub path: SawPath,
    pub speed: f32,
    pub range: f32,
    pub clockwise: bool,
    pub damage: u32,
}

impl Default for SawConfig {
    fn default() -> Self {
        Self {
            path: SawPath::Circular,
            speed: 2.0,
            range: 3.0,
            clockwise: true,
            damage: 1,
        }
    }
}

impl SawConfig {
    pub fn with_path(path: SawPath) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct Saw {
    config: SawConfig,
    core: EnemyCore,
    start: Vec2,
    angle: f32,
    distance: f32,
    direction: f32,
    side: usize,
    side_progress: f32,
    spin: f32,
}

impl Saw {
    pub fn new(config: SawConfig, start: Vec2) -> Self {
        Self {
            config,
            core: EnemyCore::new(1, 0.0, false),
            start,
            angle: 0.0,
            distance: 0.0,
            direction: 1.0,
            side: 0,
            side_progress: 0.0,
            spin: 0.0,
        }
    }

    fn turn_sign(&self) -> f32 {
        if self.config.clockwise {
            1.0
        } else {
            -1.0
        }
    }

    /// Advance the ping-pong offset, reversing at the range limit or when `blocked`
    fn ping_pong(&mut self, dt: f32, blocked: impl Fn(f32) -> bool) -> f32 {
        self.distance += self.config.speed * dt * self.direction;
        let range = self.config.range;
        if self.distance.abs() >= range || blocked(self.distance) {
            self.direction = -self.direction;
            self.distance = self.distance.clamp(-range, range);
        }
        self.distance
    }

    fn orbit(&mut self, center: Vec2, radius: f32, dt: f32) -> Vec2 {
        self.angle = (self.angle + self.config.speed * dt * self.turn_sign()) % TAU;
        center + Vec2::new(self.angle.cos(), self.angle.sin()) * radius
    }

    fn square(&mut self, center: Vec2, width: f32, height: f32, dt: f32) -> (Vec2, f32) {
        self.side_progress += self.config.speed * dt;
        let side_length = if self.side % 2 == 0 { height } else { width };
        if self.side_progress >= side_length {
            self.side_progress = 0.0;
            self.side = if self.config.clockwise {
                (self.side + 1) % 4
            } else {
                (self.side + 3) % 4
            };
        }

        let (hw, hh) = (width / 2.0, height / 2.0);
        let p = self.side_progress;
        match self.side {
            0 => (center + Vec2::new(hw, -hh + p), 270.0),
            1 => (center + Vec2::new(hw - p, hh), 0.0),
            2 => (center + Vec2::new(-hw, hh - p), 90.0),
            _ => (center + Vec2::new(-hw + p, -hh), 180.0),
        }
    }

    /// Where the saw should be after `dt`, plus an explicit blade rotation if the path sets one
    fn next_position(&mut self, probe: &dyn Probe, dt: f32) -> (Vec2, Option<f32>) {
        let start = self.start;
        match self.config.path.clone() {
            SawPath::Circular => (self.orbit(start, self.config.range, dt), None),
            SawPath::Horizontal => {
                let d = self.ping_pong(dt, |_| false);
                (start + Vec2::new(d, 0.0), None)
            }
            SawPath::Vertical => {
                let d = self.ping_pong(dt, |_| false);
                (start + Vec2::new(0.0, d), None)
            }
            SawPath::FloorHorizontal => {
                let d = self.ping_pong(dt, |d| {
                    let at = start + Vec2::new(d, 0.0);
                    !surface_near(probe, at, Vec2::NEG_Y) && !surface_near(probe, at, Vec2::Y)
                });
                (start + Vec2::new(d, 0.0), None)
            }
            SawPath::WallVertical => {
                let d = self.ping_pong(dt, |d| {
                    let at = start + Vec2::new(0.0, d);
                    !surface_near(probe, at, Vec2::X) && !surface_near(probe, at, Vec2::NEG_X)
                });
                (start + Vec2::new(0.0, d), None)
            }
            SawPath::Orbit { center, radius } => {
                (self.orbit(center.unwrap_or(start), radius, dt), None)
            }
            SawPath::Square {
                center,
                width,
                height,
                rotate,
            } => {
                let (position, rotation) = self.square(center.unwrap_or(start), width, height, dt);
                (position, rotate.then_some(rotation))
            }
        }
    }
}

fn surface_near(probe: &dyn Probe, at: Vec2, dir: Vec2) -> bool {
    probe.ray_hits(at, dir, SURFACE_PROBE, CollisionGroups::Terrain)
}

impl EnemyBehavior for Saw {
    fn kind(&self) -> EnemyKind {
        if self.config.path.is_half_saw() {
            EnemyKind::HalfSaw
        } else {
            EnemyKind::Saw
        }
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        let (position, rotation) = self.next_position(ctx.probe, ctx.dt);
        ctx.push(BodyCommand::SetPosition(position));

        let rotation = match rotation {
            Some(fixed) => fixed,
            None if !self.config.path.is_half_saw() => {
                self.spin =
                    (self.spin + self.config.speed * SPIN_RATE * ctx.dt * self.turn_sign()) % 360.0;
                self.spin
            }
            None => return,
        };
        ctx.push(BodyCommand::SetRotation(rotation));
    }

    fn on_player_contact(&mut self, ctx: &mut EnemyContext, _player: PlayerView) -> ContactOutcome {
        ContactOutcome::damage(Vec2::new(ctx.position.x, 0.0), self.config.damage)
    }

    /// Blades cannot be broken
    fn on_weapon_hit(&mut self, _ctx: &mut EnemyContext, _source: Vec2) {}
}
