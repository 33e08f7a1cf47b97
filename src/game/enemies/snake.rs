// Snake: fast patroller, stops moving once the player is dead

use glam::Vec2;

use super::utils::{flip, should_turn};
use super::{EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::BodyCommand;

pub const HALF_WIDTH: f32 = 0.3;
pub const HALF_HEIGHT: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct SnakeConfig {
    pub speed: f32,
    pub hp: i32,
    pub knockback_force: f32,
    pub wall_check_distance: f32,
    pub edge_check_distance: f32,
    pub stop_at_edge: bool,
    pub start_left: bool,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
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
pub struct Snake {
    config: SnakeConfig,
    core: EnemyCore,
    movement: f32,
}

impl Snake {
    pub fn new(config: SnakeConfig) -> Self {
        let mut core = EnemyCore::new(config.hp, config.knockback_force, true)
            .with_clip(AnimationClip::looping("slither", 4, 10.0));
        if config.start_left {
            core = core.facing_left();
        }
        Self {
            movement: config.speed,
            config,
            core,
        }
    }

    /// Current movement speed (0 once stopped)
    pub fn movement(&self) -> f32 {
        self.movement
    }
}

impl EnemyBehavior for Snake {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Snake
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        let player_alive = ctx.player.map_or(true, |p| p.alive);
        if !player_alive || !self.core.is_alive() {
            self.movement = 0.0;
        } else if !self.core.damaged {
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

        self.core.animator.set_float("movement", self.movement);
        self.core.play_state("slither");
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::ContactOutcome;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use crate::engine::physics::CollisionGroups;
    use approx::assert_relative_eq;

    #[test]
    fn test_moves_at_speed() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut snake = Snake::new(SnakeConfig::default());
        let mut pos = Vec2::new(0.0, 0.25);
        run(&mut snake, &mut pos, None, &probe, 30);
        assert_relative_eq!(pos.x, 1.5, epsilon = 1e-3);
    }

    #[test]
    fn test_turns_at_ledge_without_moving() {
        // Platform ends at x = 1
        let probe = FakeProbe::new().with_box(
            CollisionGroups::Terrain,
            Vec2::new(0.0, -0.5),
            Vec2::new(2.0, 1.0),
        );
        let mut snake = Snake::new(SnakeConfig::default());
        let mut pos = Vec2::new(0.52, 0.25);
        let commands = run(&mut snake, &mut pos, None, &probe, 2);
        assert_eq!(snake.core().facing, -1.0);
        assert_eq!(translations(&commands).len(), 1);
    }

    #[test]
    fn test_stops_when_player_dead() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut snake = Snake::new(SnakeConfig::default());
        let mut pos = Vec2::ZERO;
        let mut player = player_at(5.0, 0.0);
        player.alive = false;
        let commands = run(&mut snake, &mut pos, Some(player), &probe, 10);
        assert!(translations(&commands).is_empty());
        assert_eq!(snake.movement(), 0.0);
    }

    #[test]
    fn test_weapon_kills_in_one_hit() {
        let probe = FakeProbe::new().with_floor(0.0);
        let mut snake = Snake::new(SnakeConfig::default());
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        snake.on_weapon_hit(&mut ctx, Vec2::new(-0.5, 0.3));
        assert!(!snake.core().is_alive());
        assert!(ctx.commands.is_empty());
        assert_eq!(
            snake.on_player_contact(&mut ctx, player_at(0.5, 0.0)),
            ContactOutcome::none()
        );
    }
}
