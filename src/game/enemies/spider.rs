// Spider: patroller that speeds up and leaps at a player in front of it

use glam::Vec2;
use log::debug;

use super::utils::{direction_to_player, flip, is_player_in_front, is_player_in_range, should_turn};
use super::{EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::{BodyCommand, CollisionGroups};

pub const HALF_WIDTH: f32 = 0.3;
pub const HALF_HEIGHT: f32 = 0.25;

/// Share of the jump force spent on horizontal motion
const JUMP_FORWARD_FACTOR: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    pub speed: f32,
    pub chase_speed: f32,
    pub jump_force: f32,
    pub detection_range: f32,
    /// Seconds between leaps
    pub jump_cooldown: f32,
    pub hp: i32,
    pub knockback_force: f32,
    pub wall_check_distance: f32,
    pub edge_check_distance: f32,
    pub ground_check_distance: f32,
    pub stop_at_edge: bool,
    pub start_left: bool,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            chase_speed: 4.0,
            jump_force: 8.0,
            detection_range: 3.0,
            jump_cooldown: 2.0,
            hp: 2,
            knockback_force: 6.0,
            wall_check_distance: 0.2,
            edge_check_distance: 0.5,
            ground_check_distance: 0.1,
            stop_at_edge: true,
            start_left: false,
        }
    }
}

#[derive(Debug)]
pub struct Spider {
    config: SpiderConfig,
    core: EnemyCore,
    movement: f32,
    chasing: bool,
    grounded: bool,
    last_jump: Option<f64>,
    jumped: bool,
}

impl Spider {
    pub fn new(config: SpiderConfig) -> Self {
        let mut core = EnemyCore::new(config.hp, config.knockback_force, true)
            .with_clip(AnimationClip::looping("crawl", 6, 12.0));
        if config.start_left {
            core = core.facing_left();
        }
        Self {
            movement: config.speed,
            config,
            core,
            chasing: false,
            grounded: true,
            last_jump: None,
            jumped: false,
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn jump_ready(&self, now: f64) -> bool {
        self.last_jump
            .map_or(true, |t| now - t >= self.config.jump_cooldown as f64)
    }

    fn jump_towards(&mut self, ctx: &mut EnemyContext, player: Vec2) {
        let dir = direction_to_player(ctx.position, player);
        let force = self.config.jump_force;
        ctx.push(BodyCommand::Impulse(Vec2::new(
            dir.x * force * JUMP_FORWARD_FACTOR,
            force,
        )));
        if dir.x > 0.0 {
            self.core.facing = 1.0;
        } else if dir.x < 0.0 {
            self.core.facing = -1.0;
        }
        self.last_jump = Some(ctx.time);
        self.jumped = true;
        debug!("Spider leaped at the player");
    }
}

impl EnemyBehavior for Spider {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Spider
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        let feet = ctx.position - Vec2::new(0.0, HALF_HEIGHT);
        self.grounded = ctx.probe.ray_hits(
            feet,
            Vec2::NEG_Y,
            self.config.ground_check_distance,
            CollisionGroups::Terrain,
        );

        let player = match ctx.live_player() {
            Some(player) if self.core.is_alive() => player,
            _ => {
                self.movement = 0.0;
                self.chasing = false;
                self.core.animator.set_float("movement", self.movement);
                return;
            }
        };

        let in_range =
            is_player_in_range(ctx.position, player.position, self.config.detection_range);
        let in_front = is_player_in_front(ctx.position, self.core.facing, player.position);
        if in_range && in_front {
            self.chasing = true;
            self.movement = self.config.chase_speed;
            if self.grounded && self.jump_ready(ctx.time) {
                self.jump_towards(ctx, player.position);
            }
        } else if self.chasing {
            self.chasing = false;
            self.movement = self.config.speed;
        }

        if self.grounded && !self.core.damaged {
            if should_turn(
                ctx.probe,
                ctx.position,
                HALF_WIDTH,
                self.core.facing,
                self.config.wall_check_distance,
                self.config.edge_check_distance,
                self.config.stop_at_edge,
            ) {
                self.core.facing = flip(self.core.facing);
            } else {
                ctx.push(BodyCommand::Translate(Vec2::new(
                    self.core.facing * self.movement * ctx.dt,
                    0.0,
                )));
            }
        }

        self.core.animator.set_bool("jump", self.jumped);
        self.core.animator.set_float("movement", self.movement);
        self.jumped = false;
        self.core.play_state("crawl");
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use approx::assert_relative_eq;

    #[test]
    fn test_leaps_at_player_in_front() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut spider = Spider::new(SpiderConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        let commands = run(&mut spider, &mut pos, Some(player_at(2.0, 0.25)), &probe, 1);

        assert!(spider.is_chasing());
        let jump = impulses(&commands)[0];
        assert_relative_eq!(jump.x, 8.0 * 0.7, epsilon = 1e-4);
        assert_relative_eq!(jump.y, 8.0);
    }

    #[test]
    fn test_jump_cooldown() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut spider = Spider::new(SpiderConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        // Player keeps pace so it stays in range
        let commands = run(&mut spider, &mut pos, Some(player_at(1.0, 0.25)), &probe, 60);
        assert_eq!(impulses(&commands).len(), 1);
    }

    #[test]
    fn test_ignores_player_behind() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut spider = Spider::new(SpiderConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        let commands = run(&mut spider, &mut pos, Some(player_at(-1.5, 0.25)), &probe, 10);
        assert!(!spider.is_chasing());
        assert!(impulses(&commands).is_empty());
        assert!(pos.x > 0.0);
    }

    #[test]
    fn test_no_leap_in_the_air() {
        let probe = FakeProbe::new().with_floor(-3.0);
        let mut spider = Spider::new(SpiderConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        let commands = run(&mut spider, &mut pos, Some(player_at(2.0, 0.25)), &probe, 5);
        assert!(!spider.is_grounded());
        assert!(commands.is_empty());
    }
}
