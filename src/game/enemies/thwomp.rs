// Thwomp: heavy block that drops on a player passing underneath

use glam::Vec2;
use log::debug;

use super::{ContactOutcome, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::engine::physics::{BodyCommand, BodyMode, CollisionGroups};
use crate::game::player::PlayerView;

/// Edge length of the block
pub const SIZE: f32 = 0.78;

/// Distance from the arrival point at which the block snaps back home
const HOME_SNAP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThwompState {
    Idle,
    /// Player spotted, about to drop
    Detecting,
    Falling,
    /// Resting on the ground
    Waiting,
    Rising,
}

#[derive(Debug, Clone)]
pub struct ThwompConfig {
    /// How far below the block the player is noticed
    pub detection_range: f32,
    /// Horizontal half-span of the detection column
    pub detection_width: f32,
    /// Delay between noticing the player and dropping
    pub detection_delay: f32,
    pub fall_speed: f32,
    pub rise_speed: f32,
    pub wait_time: f32,
    pub damage: u32,
}

impl Default for ThwompConfig {
    fn default() -> Self {
        Self {
            detection_range: 4.0,
            detection_width: 0.88,
            detection_delay: 0.3,
            fall_speed: 8.0,
            rise_speed: 2.0,
            wait_time: 2.0,
            damage: 2,
        }
    }
}

#[derive(Debug)]
pub struct Thwomp {
    config: ThwompConfig,
    core: EnemyCore,
    state: ThwompState,
    start: Vec2,
    timer: f32,
}

impl Thwomp {
    pub fn new(config: ThwompConfig, start: Vec2) -> Self {
        Self {
            config,
            core: EnemyCore::new(1, 0.0, false),
            state: ThwompState::Idle,
            start,
            timer: 0.0,
        }
    }

    pub fn state(&self) -> ThwompState {
        self.state
    }

    fn player_below(&self, ctx: &EnemyContext) -> bool {
        ctx.live_player().is_some_and(|player| {
            let offset = player.position - ctx.position;
            offset.y < 0.0
                && offset.y.abs() <= self.config.detection_range
                && offset.x.abs() <= self.config.detection_width
        })
    }

    fn watch(&mut self, ctx: &mut EnemyContext) {
        let below = self.player_below(ctx);
        match self.state {
            ThwompState::Idle if below => {
                self.state = ThwompState::Detecting;
                self.timer = self.config.detection_delay;
            }
            ThwompState::Detecting if !below => {
                self.state = ThwompState::Idle;
            }
            ThwompState::Detecting => {
                self.timer -= ctx.dt;
                if self.timer <= 0.0 {
                    debug!("Thwomp dropping");
                    self.state = ThwompState::Falling;
                    ctx.push(BodyCommand::SetMode(BodyMode::Kinematic));
                }
            }
            _ => {}
        }
    }

    fn fall(&mut self, ctx: &mut EnemyContext) {
        let half = SIZE / 2.0;
        let step = self.config.fall_speed * ctx.dt;
        let ground = ctx.probe.ray_distance(
            ctx.position,
            Vec2::NEG_Y,
            half + step,
            CollisionGroups::Terrain,
        );
        match ground {
            Some(distance) => {
                let landed = ctx.position - Vec2::new(0.0, (distance - half).max(0.0));
                ctx.push(BodyCommand::SetPosition(landed));
                ctx.push(BodyCommand::SetMode(BodyMode::Fixed));
                self.state = ThwompState::Waiting;
                self.timer = self.config.wait_time;
            }
            None => ctx.push(BodyCommand::Translate(Vec2::new(0.0, -step))),
        }
    }

    fn rise(&mut self, ctx: &mut EnemyContext) {
        let to_start = self.start - ctx.position;
        let step = self.config.rise_speed * ctx.dt;
        if to_start.length() < HOME_SNAP.max(step) {
            ctx.push(BodyCommand::SetPosition(self.start));
            ctx.push(BodyCommand::SetMode(BodyMode::Fixed));
            self.state = ThwompState::Idle;
        } else {
            ctx.push(BodyCommand::Translate(to_start.normalize_or_zero() * step));
        }
    }
}

impl EnemyBehavior for Thwomp {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Thwomp
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        match self.state {
            ThwompState::Idle | ThwompState::Detecting => self.watch(ctx),
            ThwompState::Falling => self.fall(ctx),
            ThwompState::Waiting => {
                self.timer -= ctx.dt;
                if self.timer <= 0.0 {
                    self.state = ThwompState::Rising;
                    ctx.push(BodyCommand::SetMode(BodyMode::Kinematic));
                }
            }
            ThwompState::Rising => self.rise(ctx),
        }
        self.core
            .animator
            .set_bool("falling", self.state == ThwompState::Falling);
    }

    fn on_player_contact(&mut self, ctx: &mut EnemyContext, _player: PlayerView) -> ContactOutcome {
        if self.state == ThwompState::Falling {
            ContactOutcome::damage(ctx.position, self.config.damage)
        } else {
            ContactOutcome::none()
        }
    }

    /// Indestructible
    fn on_weapon_hit(&mut self, _ctx: &mut EnemyContext, _source: Vec2) {}
}
