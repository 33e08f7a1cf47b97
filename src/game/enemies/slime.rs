// Slime: slow patroller that gets squished when stomped

use glam::Vec2;
use log::debug;

use super::utils::{flip, should_turn};
use super::{
    is_stomp, resolve_contact, ContactOutcome, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind,
    STOMP_BOUNCE,
};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::BodyCommand;
use crate::game::player::PlayerView;

pub const HALF_WIDTH: f32 = 0.25;
pub const HALF_HEIGHT: f32 = 0.25;

const SQUISHED_CLIP: &str = "squished";

#[derive(Debug, Clone)]
pub struct SlimeConfig {
    pub speed: f32,
    pub hp: i32,
    pub knockback_force: f32,
    pub wall_check_distance: f32,
    pub edge_check_distance: f32,
    pub stop_at_edge: bool,
    /// Seconds spent flattened after a stomp
    pub squish_duration: f32,
    pub start_left: bool,
}

impl Default for SlimeConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            hp: 2,
            knockback_force: 10.0,
            wall_check_distance: 0.27,
            edge_check_distance: 0.5,
            stop_at_edge: true,
            squish_duration: 2.0,
            start_left: false,
        }
    }
}

#[derive(Debug)]
pub struct Slime {
    config: SlimeConfig,
    core: EnemyCore,
    speed: f32,
    squished: bool,
}

impl Slime {
    pub fn new(config: SlimeConfig) -> Self {
        let mut core = EnemyCore::new(config.hp, config.knockback_force, true)
            .with_clip(AnimationClip::looping("walk", 4, 8.0))
            .with_clip(AnimationClip::timed(SQUISHED_CLIP, config.squish_duration));
        if config.start_left {
            core = core.facing_left();
        }
        Self {
            speed: config.speed,
            config,
            core,
            squished: false,
        }
    }

    pub fn is_squished(&self) -> bool {
        self.squished
    }

    fn squish(&mut self, ctx: &mut EnemyContext) {
        self.squished = true;
        self.speed = 0.0;
        self.core.can_be_squished = false;
        self.core.take_damage(ctx, None, 1);
        if self.core.is_alive() {
            self.core.animator.play_from_start(SQUISHED_CLIP);
        }
        ctx.push(BodyCommand::SetVelocityX(0.0));
        debug!("Slime squished, hp {}", self.core.hp);
    }

    fn recover(&mut self) {
        self.squished = false;
        self.speed = self.config.speed;
        self.core.can_be_squished = true;
        self.core.reset_damage();
    }
}

impl EnemyBehavior for Slime {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Slime
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        if !self.core.is_alive() || self.squished {
            return;
        }

        if !self.core.damaged {
            ctx.push(BodyCommand::Translate(Vec2::new(
                self.core.facing * self.speed * ctx.dt,
                0.0,
            )));
        }

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
        }

        self.core.play_state("walk");
    }

    fn on_player_contact(&mut self, ctx: &mut EnemyContext, player: PlayerView) -> ContactOutcome {
        if self.squished || !self.core.is_alive() {
            return ContactOutcome::none();
        }
        if is_stomp(&self.core, ctx.position, player) {
            self.squish(ctx);
            return ContactOutcome::bounce(STOMP_BOUNCE);
        }
        resolve_contact(&mut self.core, ctx, player)
    }

    fn on_animation_finished(&mut self, ctx: &mut EnemyContext, clip: &str) {
        if clip == SQUISHED_CLIP {
            debug!("Slime recovered");
            self.recover();
        } else {
            self.core.handle_clip_end(ctx, clip);
        }
    }
}
