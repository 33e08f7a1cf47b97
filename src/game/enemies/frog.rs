// Frog: hops on a timer, faster and higher once the player is near

use glam::Vec2;
use log::debug;

use super::utils::{detect_enemy, detect_wall, direction_to_player, flip, front, is_player_in_range};
use super::{EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::{BodyCommand, CollisionGroups};

pub const HALF_WIDTH: f32 = 0.3;
pub const HALF_HEIGHT: f32 = 0.4;

/// Ground sensor sits this far below the body center
const SENSOR_DROP: f32 = 0.5;

/// Hop impulse pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub horizontal: f32,
    pub vertical: f32,
    /// Seconds between hops
    pub interval: f32,
}

#[derive(Debug, Clone)]
pub struct FrogConfig {
    pub hop: Hop,
    pub chase_hop: Hop,
    pub detection_range: f32,
    pub hp: i32,
    pub knockback_force: f32,
    pub wall_check_distance: f32,
    pub ground_check_distance: f32,
    pub ground_check_width: f32,
    pub stop_at_edge: bool,
    pub start_left: bool,
}

impl Default for FrogConfig {
    fn default() -> Self {
        Self {
            hop: Hop {
                horizontal: 5.0,
                vertical: 8.0,
                interval: 2.0,
            },
            chase_hop: Hop {
                horizontal: 8.0,
                vertical: 12.0,
                interval: 0.8,
            },
            detection_range: 4.0,
            hp: 3,
            knockback_force: 6.0,
            wall_check_distance: 0.2,
            ground_check_distance: 0.1,
            ground_check_width: 0.1,
            stop_at_edge: true,
            start_left: false,
        }
    }
}

#[derive(Debug)]
pub struct Frog {
    config: FrogConfig,
    core: EnemyCore,
    current: Hop,
    chasing: bool,
    grounded: bool,
    jump_timer: f32,
}

impl Frog {
    pub fn new(config: FrogConfig) -> Self {
        let mut core = EnemyCore::new(config.hp, config.knockback_force, true)
            .with_clip(AnimationClip::looping("jump", 2, 6.0));
        if config.start_left {
            core = core.facing_left();
        }
        Self {
            current: config.hop,
            jump_timer: config.hop.interval,
            config,
            core,
            chasing: false,
            grounded: false,
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn current_hop(&self) -> Hop {
        self.current
    }

    fn ground_below(&self, ctx: &EnemyContext, at: Vec2) -> bool {
        ctx.probe.box_hits_below(
            at - Vec2::new(0.0, SENSOR_DROP),
            self.config.ground_check_width,
            self.config.ground_check_distance,
            CollisionGroups::Terrain,
        )
    }

    fn check_grounded(&mut self, ctx: &mut EnemyContext) {
        let was_grounded = self.grounded;
        self.grounded = self.ground_below(ctx, ctx.position);
        if self.grounded && !was_grounded && ctx.velocity.y <= 0.0 {
            ctx.push(BodyCommand::SetVelocity(Vec2::ZERO));
        }
    }

    fn hop(&mut self, ctx: &mut EnemyContext, player: Vec2) {
        if self.chasing && player.x != ctx.position.x {
            self.core.facing = (player.x - ctx.position.x).signum();
        }

        let facing = self.core.facing;
        let ahead = front(ctx.position, facing, HALF_WIDTH);
        let ledge = self.config.stop_at_edge
            && !self.ground_below(ctx, ctx.position + Vec2::new(facing * 0.5, 0.0));
        if detect_wall(ctx.probe, ahead, facing, self.config.wall_check_distance)
            || ledge
            || detect_enemy(ctx.probe, ahead, facing, self.config.wall_check_distance)
        {
            self.core.facing = flip(facing);
        }

        let horizontal = if self.chasing {
            direction_to_player(ctx.position, player).x
        } else {
            self.core.facing
        };
        ctx.push(BodyCommand::SetVelocityY(0.0));
        ctx.push(BodyCommand::Impulse(Vec2::new(
            horizontal * self.current.horizontal,
            self.current.vertical,
        )));
        debug!("Frog hop (chasing: {})", self.chasing);
    }
}

impl EnemyBehavior for Frog {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Frog
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.check_grounded(ctx);
        self.core.animator.set_bool("grounded", self.grounded);

        let player = match ctx.live_player() {
            Some(player) if self.core.is_alive() => player,
            _ => return,
        };

        let in_range =
            is_player_in_range(ctx.position, player.position, self.config.detection_range);
        if in_range && !self.chasing {
            self.chasing = true;
            self.current = self.config.chase_hop;
            if player.position.x != ctx.position.x {
                self.core.facing = (player.position.x - ctx.position.x).signum();
            }
        } else if !in_range && self.chasing {
            self.chasing = false;
            self.current = self.config.hop;
        }

        if self.grounded && !self.core.damaged {
            self.jump_timer -= ctx.dt;
            if self.jump_timer <= 0.0 {
                self.hop(ctx, player.position);
                self.jump_timer = self.current.interval;
            }
        }

        self.core.play_state("jump");
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use approx::assert_relative_eq;

    #[test]
    fn test_hops_on_interval() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut frog = Frog::new(FrogConfig::default());
        let mut pos = Vec2::new(0.0, 0.4);
        let far = Some(player_at(50.0, 0.5));

        let commands = run(&mut frog, &mut pos, far, &probe, 110);
        assert!(impulses(&commands).is_empty());

        let commands = run(&mut frog, &mut pos, far, &probe, 20);
        let hops = impulses(&commands);
        assert_eq!(hops.len(), 1);
        assert_relative_eq!(hops[0].x, 5.0);
        assert_relative_eq!(hops[0].y, 8.0);
    }

    #[test]
    fn test_chase_hops_toward_player() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut frog = Frog::new(FrogConfig::default());
        let mut pos = Vec2::new(0.0, 0.4);
        let near = Some(player_at(-3.0, 0.4));

        let commands = run(&mut frog, &mut pos, near, &probe, 125);
        assert!(frog.is_chasing());
        assert_eq!(frog.core().facing, -1.0);
        let hops = impulses(&commands);
        assert!(!hops.is_empty());
        assert_relative_eq!(hops[0].x, -8.0, epsilon = 1e-4);
        assert_relative_eq!(hops[0].y, 12.0);
        assert_eq!(frog.current_hop().interval, 0.8);
    }

    #[test]
    fn test_no_hop_in_the_air() {
        let probe = FakeProbe::new().with_floor(-5.0);
        let mut frog = Frog::new(FrogConfig::default());
        let mut pos = Vec2::new(0.0, 0.4);
        let commands = run(&mut frog, &mut pos, Some(player_at(1.0, 0.4)), &probe, 200);
        assert!(!frog.is_grounded());
        assert!(impulses(&commands).is_empty());
    }

    #[test]
    fn test_turns_at_ledge_before_hopping() {
        // Platform ends at x = 0.3
        let probe = FakeProbe::new().with_box(
            CollisionGroups::Terrain,
            Vec2::new(-1.0, -0.5),
            Vec2::new(2.6, 1.0),
        );
        let mut frog = Frog::new(FrogConfig::default());
        let mut pos = Vec2::new(0.0, 0.4);
        let commands = run(&mut frog, &mut pos, Some(player_at(50.0, 0.5)), &probe, 125);
        assert_eq!(frog.core().facing, -1.0);
        assert!(impulses(&commands)[0].x < 0.0);
    }

    #[test]
    fn test_landing_stops_drift() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut frog = Frog::new(FrogConfig::default());
        let mut ctx = EnemyContext::new(
            Vec2::new(0.0, 0.4),
            Vec2::new(3.0, -2.0),
            DT,
            0.0,
            None,
            &probe,
        );
        frog.update(&mut ctx);
        assert_eq!(ctx.commands, vec![BodyCommand::SetVelocity(Vec2::ZERO)]);
    }
}
