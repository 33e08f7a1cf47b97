// Lava: a pool that periodically swells upward and burns whatever it covers

use glam::Vec2;
use log::debug;

use super::{ContactOutcome, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind};
use crate::core::math::move_towards;
use crate::engine::physics::BodyCommand;
use crate::game::player::PlayerView;

/// Height difference under which the surface snaps to its target
const SNAP: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LavaState {
    /// Low, waiting for the next eruption
    Waiting,
    Rising,
    Up,
    Lowering,
}

#[derive(Debug, Clone)]
pub struct LavaConfig {
    pub width: f32,
    /// Height of the pool at rest
    pub base_height: f32,
    /// Extra height when fully risen
    pub rise_height: f32,
    pub rise_speed: f32,
    /// Seconds spent low between eruptions
    pub rise_interval: f32,
    pub stay_up_duration: f32,
    pub start_active: bool,
    pub damage: u32,
}

impl Default for LavaConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            base_height: 0.5,
            rise_height: 3.0,
            rise_speed: 2.0,
            rise_interval: 4.0,
            stay_up_duration: 2.0,
            start_active: false,
            damage: 2,
        }
    }
}

#[derive(Debug)]
pub struct Lava {
    config: LavaConfig,
    core: EnemyCore,
    state: LavaState,
    /// Fixed bottom edge of the pool
    bottom: f32,
    x: f32,
    height: f32,
    timer: f32,
    dirty: bool,
}

impl Lava {
    /// `at` is the center of the pool at rest
    pub fn new(config: LavaConfig, at: Vec2) -> Self {
        let bottom = at.y - config.base_height / 2.0;
        let (state, height, timer) = if config.start_active {
            (
                LavaState::Up,
                config.base_height + config.rise_height,
                config.stay_up_duration,
            )
        } else {
            (LavaState::Waiting, config.base_height, config.rise_interval)
        };
        Self {
            config,
            core: EnemyCore::new(1, 0.0, false),
            state,
            bottom,
            x: at.x,
            height,
            timer,
            dirty: true,
        }
    }

    pub fn state(&self) -> LavaState {
        self.state
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Top surface of the pool
    pub fn surface(&self) -> f32 {
        self.bottom + self.height
    }

    pub fn is_dangerous(&self) -> bool {
        matches!(self.state, LavaState::Up | LavaState::Rising)
    }

    fn max_height(&self) -> f32 {
        self.config.base_height + self.config.rise_height
    }

    fn grow_towards(&mut self, target: f32, dt: f32) -> bool {
        self.height = move_towards(self.height, target, self.config.rise_speed * dt);
        self.dirty = true;
        if (self.height - target).abs() < SNAP {
            self.height = target;
            true
        } else {
            false
        }
    }
}

impl EnemyBehavior for Lava {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Lava
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.timer -= ctx.dt;
        match self.state {
            LavaState::Waiting if self.timer <= 0.0 => {
                debug!("Lava rising");
                self.state = LavaState::Rising;
            }
            LavaState::Rising => {
                if self.grow_towards(self.max_height(), ctx.dt) {
                    self.state = LavaState::Up;
                    self.timer = self.config.stay_up_duration;
                }
            }
            LavaState::Up if self.timer <= 0.0 => {
                debug!("Lava lowering");
                self.state = LavaState::Lowering;
            }
            LavaState::Lowering => {
                if self.grow_towards(self.config.base_height, ctx.dt) {
                    self.state = LavaState::Waiting;
                    self.timer = self.config.rise_interval;
                }
            }
            _ => {}
        }

        if self.dirty {
            ctx.push(BodyCommand::ResizeBox(Vec2::new(
                self.config.width / 2.0,
                self.height / 2.0,
            )));
            ctx.push(BodyCommand::SetPosition(Vec2::new(
                self.x,
                self.bottom + self.height / 2.0,
            )));
            self.dirty = false;
        }
        ctx.push(BodyCommand::SetColliderEnabled(self.is_dangerous()));
        self.core.animator.set_bool("active", self.is_dangerous());
    }

    fn on_player_contact(&mut self, _ctx: &mut EnemyContext, _player: PlayerView) -> ContactOutcome {
        if self.is_dangerous() {
            ContactOutcome::damage(Vec2::new(self.x, self.bottom), self.config.damage)
        } else {
            ContactOutcome::none()
        }
    }

    fn on_weapon_hit(&mut self, _ctx: &mut EnemyContext, _source: Vec2) {}
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use approx::assert_relative_eq;

    #[test]
    fn test_eruption_cycle() {
        let probe = FakeProbe::new();
        let mut lava = Lava::new(LavaConfig::default(), Vec2::new(0.0, 0.25));
        let mut pos = Vec2::new(0.0, 0.25);

        let commands = run(&mut lava, &mut pos, None, &probe, 1);
        assert!(commands.contains(&BodyCommand::SetColliderEnabled(false)));
        assert_eq!(lava.state(), LavaState::Waiting);

        let commands = run(&mut lava, &mut pos, None, &probe, 240);
        assert_eq!(lava.state(), LavaState::Rising);
        assert!(commands.contains(&BodyCommand::SetColliderEnabled(true)));

        run(&mut lava, &mut pos, None, &probe, 95);
        assert_eq!(lava.state(), LavaState::Up);
        assert_relative_eq!(lava.height(), 3.5);
        // Bottom stays put while the surface climbs
        assert_relative_eq!(pos.y, 3.5 / 2.0, epsilon = 1e-4);
        assert_relative_eq!(lava.surface(), 3.5, epsilon = 1e-4);

        let commands = run(&mut lava, &mut pos, None, &probe, 1);
        assert!(commands.contains(&BodyCommand::SetColliderEnabled(true)));

        run(&mut lava, &mut pos, None, &probe, 121);
        assert_eq!(lava.state(), LavaState::Lowering);
        run(&mut lava, &mut pos, None, &probe, 95);
        assert_eq!(lava.state(), LavaState::Waiting);
        assert_relative_eq!(lava.height(), 0.5);
    }

    #[test]
    fn test_start_active() {
        let probe = FakeProbe::new();
        let config = LavaConfig {
            start_active: true,
            ..LavaConfig::default()
        };
        let mut lava = Lava::new(config, Vec2::new(0.0, 0.25));
        let mut pos = Vec2::new(0.0, 0.25);
        let commands = run(&mut lava, &mut pos, None, &probe, 1);
        assert_eq!(lava.state(), LavaState::Up);
        assert!(commands.contains(&BodyCommand::ResizeBox(Vec2::new(1.0, 1.75))));
        assert_relative_eq!(pos.y, 1.75);
    }

    #[test]
    fn test_burns_only_when_active() {
        let probe = FakeProbe::new();
        let mut lava = Lava::new(LavaConfig::default(), Vec2::ZERO);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        assert_eq!(
            lava.on_player_contact(&mut ctx, player_at(0.0, 0.5)),
            ContactOutcome::none()
        );

        let mut active = Lava::new(
            LavaConfig {
                start_active: true,
                ..LavaConfig::default()
            },
            Vec2::ZERO,
        );
        let outcome = active.on_player_contact(&mut ctx, player_at(0.0, 0.5));
        assert_eq!(outcome.player_damage.map(|d| d.amount), Some(2));
    }

    #[test]
    fn test_rising_lava_burns() {
        let world = FakeProbe::new();
        let config = LavaConfig {
            rise_interval: 0.1,
            ..LavaConfig::default()
        };
        let mut lava = Lava::new(config, Vec2::new(0.0, 0.25));
        let mut pos = Vec2::new(0.0, 0.25);
        run(&mut lava, &mut pos, None, &world, 10);
        assert_eq!(lava.state(), LavaState::Rising);

        let mut ctx = EnemyContext::new(pos, Vec2::ZERO, DT, 0.0, None, &world);
        let outcome = lava.on_player_contact(&mut ctx, player_at(0.0, 0.5));
        assert_eq!(outcome.player_damage.map(|d| d.amount), Some(2));
    }
}
