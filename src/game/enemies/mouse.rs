// Mouse: patrols like a slime and rushes the player when they come close

use glam::Vec2;
use log::debug;

use super::utils::{face_towards, flip, is_player_in_range, should_turn};
use super::{EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::BodyCommand;

pub const HALF_WIDTH: f32 = 0.25;
pub const HALF_HEIGHT: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct MouseConfig {
    pub speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    pub hp: i32,
    pub knockback_force: f32,
    pub wall_check_distance: f32,
    pub edge_check_distance: f32,
    pub stop_at_edge: bool,
    pub start_left: bool,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            chase_speed: 4.0,
            detection_range: 3.0,
            hp: 1,
            knockback_force: 6.0,
            wall_check_distance: 0.2,
            edge_check_distance: 0.5,
            stop_at_edge: true,
            start_left: false,
        }
    }
}

#[derive(Debug)]
pub struct Mouse {
    config: MouseConfig,
    core: EnemyCore,
    movement: f32,
    chasing: bool,
}

impl Mouse {
    pub fn new(config: MouseConfig) -> Self {
        let mut core = EnemyCore::new(config.hp, config.knockback_force, true)
            .with_clip(AnimationClip::looping("run", 4, 12.0));
        if config.start_left {
            core = core.facing_left();
        }
        Self {
            movement: config.speed,
            config,
            core,
            chasing: false,
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn movement(&self) -> f32 {
        self.movement
    }

    fn patrol(&mut self, ctx: &mut EnemyContext) {
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
}

impl EnemyBehavior for Mouse {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Mouse
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        let player = match ctx.live_player() {
            Some(player) if self.core.is_alive() => player,
            _ => {
                self.movement = 0.0;
                self.core.animator.set_float("movement", self.movement);
                return;
            }
        };

        let in_range =
            is_player_in_range(ctx.position, player.position, self.config.detection_range);
        if in_range && !self.chasing {
            debug!("Mouse spotted the player");
            self.chasing = true;
            self.movement = self.config.chase_speed;
            self.core.facing = face_towards(ctx.position, self.core.facing, player.position);
        } else if !in_range && self.chasing {
            self.chasing = false;
            self.movement = self.config.speed;
        }

        if !self.core.damaged {
            if self.chasing {
                let dx = player.position.x - ctx.position.x;
                let step = dx.signum() * self.movement * ctx.dt;
                // Never overshoot the player horizontally
                let step = if step.abs() > dx.abs() { dx } else { step };
                ctx.push(BodyCommand::Translate(Vec2::new(step, 0.0)));
                self.core.facing = face_towards(ctx.position, self.core.facing, player.position);
            } else {
                self.patrol(ctx);
            }
        }

        self.core.animator.set_float("movement", self.movement);
        self.core.play_state("run");
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use approx::assert_relative_eq;

    #[test]
    fn test_patrols_when_player_far() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut mouse = Mouse::new(MouseConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        run(&mut mouse, &mut pos, Some(player_at(20.0, 0.5)), &probe, 30);
        assert!(!mouse.is_chasing());
        assert_relative_eq!(pos.x, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_chases_player_in_range() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut mouse = Mouse::new(MouseConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        run(&mut mouse, &mut pos, Some(player_at(-2.5, 0.5)), &probe, 15);
        assert!(mouse.is_chasing());
        assert_eq!(mouse.movement(), 4.0);
        assert_eq!(mouse.core().facing, -1.0);
        assert_relative_eq!(pos.x, -1.0, epsilon = 1e-3);
        assert_relative_eq!(pos.y, 0.25);
    }

    #[test]
    fn test_returns_to_patrol_speed() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut mouse = Mouse::new(MouseConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        run(&mut mouse, &mut pos, Some(player_at(2.0, 0.5)), &probe, 1);
        assert!(mouse.is_chasing());
        run(&mut mouse, &mut pos, Some(player_at(10.0, 0.5)), &probe, 1);
        assert!(!mouse.is_chasing());
        assert_eq!(mouse.movement(), 2.0);
    }

    #[test]
    fn test_idle_without_live_player() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut mouse = Mouse::new(MouseConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        let commands = run(&mut mouse, &mut pos, None, &probe, 10);
        assert!(translations(&commands).is_empty());
        assert_eq!(mouse.movement(), 0.0);
    }
}
