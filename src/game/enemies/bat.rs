// Bat: hangs at its roost, swoops at a nearby player and flies home afterwards

use glam::Vec2;
use log::debug;

use super::utils::{direction_to_player, is_player_in_range};
use super::{ContactOutcome, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind, HIT_CLIP};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::BodyCommand;
use crate::game::player::PlayerView;

pub const RADIUS: f32 = 0.3;
pub const MASS: f32 = 10.0;

/// Impulse applied when the bat recoils off the player
const RECOIL_FORCE: f32 = 40.0;
/// Minimum upward share of the recoil direction
const RECOIL_LIFT: f32 = 0.3;
/// Seconds before the recoil velocity is cancelled
const RECOIL_RESET: f32 = 0.5;
/// Distance at which the bat snaps back onto its roost
const HOME_SNAP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatState {
    Hanging,
    Flying,
    Returning,
}

#[derive(Debug, Clone)]
pub struct BatConfig {
    pub hp: i32,
    pub knockback_force: f32,
    pub detection_range: f32,
    pub fly_speed: f32,
    pub return_speed: f32,
}

impl Default for BatConfig {
    fn default() -> Self {
        Self {
            hp: 2,
            knockback_force: 3.0,
            detection_range: 4.0,
            fly_speed: 3.0,
            return_speed: 2.0,
        }
    }
}

#[derive(Debug)]
pub struct Bat {
    config: BatConfig,
    core: EnemyCore,
    state: BatState,
    home: Vec2,
    recoil_timer: Option<f32>,
}

impl Bat {
    pub fn new(config: BatConfig, home: Vec2) -> Self {
        let core = EnemyCore::new(config.hp, config.knockback_force, false)
            .with_clip(AnimationClip::looping("hang", 1, 1.0))
            .with_clip(AnimationClip::looping("fly", 4, 12.0));
        Self {
            config,
            core,
            state: BatState::Hanging,
            home,
            recoil_timer: None,
        }
    }

    pub fn state(&self) -> BatState {
        self.state
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    fn start_returning(&mut self) {
        debug!("Bat returning to its roost");
        self.state = BatState::Returning;
    }

    fn face(&mut self, dir: Vec2) {
        if dir.x > 0.0 {
            self.core.facing = 1.0;
        } else if dir.x < 0.0 {
            self.core.facing = -1.0;
        }
    }

    fn tick_recoil(&mut self, ctx: &mut EnemyContext) {
        if let Some(remaining) = self.recoil_timer.as_mut() {
            *remaining -= ctx.dt;
            if *remaining <= 0.0 {
                self.recoil_timer = None;
                ctx.push(BodyCommand::SetVelocity(Vec2::ZERO));
            }
        }
    }
}

impl EnemyBehavior for Bat {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Bat
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.tick_recoil(ctx);

        match ctx.live_player().filter(|_| self.core.is_alive()) {
            Some(player) => {
                let in_range = is_player_in_range(
                    ctx.position,
                    player.position,
                    self.config.detection_range,
                );
                match self.state {
                    BatState::Hanging if in_range => {
                        debug!("Bat takes flight");
                        self.state = BatState::Flying;
                    }
                    BatState::Flying if !in_range => self.start_returning(),
                    _ => {}
                }

                if !self.core.damaged {
                    match self.state {
                        BatState::Flying => {
                            let dir = direction_to_player(ctx.position, player.position);
                            ctx.push(BodyCommand::Translate(dir * self.config.fly_speed * ctx.dt));
                            self.face(dir);
                        }
                        BatState::Returning => {
                            let dir = (self.home - ctx.position).normalize_or_zero();
                            let next = ctx.position + dir * self.config.return_speed * ctx.dt;
                            self.face(dir);
                            if next.distance(self.home) < HOME_SNAP {
                                ctx.push(BodyCommand::SetPosition(self.home));
                                ctx.push(BodyCommand::SetVelocity(Vec2::ZERO));
                                self.state = BatState::Hanging;
                            } else {
                                ctx.push(BodyCommand::Translate(next - ctx.position));
                            }
                        }
                        BatState::Hanging => {}
                    }
                }
            }
            None => {
                if self.state == BatState::Flying {
                    self.start_returning();
                }
            }
        }

        let flying = self.state == BatState::Flying;
        self.core.animator.set_bool("player", flying);
        self.core.animator.set_bool("hanging", self.state == BatState::Hanging);
        self.core
            .play_state(if self.state == BatState::Hanging { "hang" } else { "fly" });
    }

    fn on_player_contact(&mut self, ctx: &mut EnemyContext, player: PlayerView) -> ContactOutcome {
        if !self.core.is_alive() {
            return ContactOutcome::none();
        }
        let mut away = (ctx.position - player.position).normalize_or_zero();
        away.y = away.y.max(RECOIL_LIFT);
        ctx.push(BodyCommand::Impulse(away * RECOIL_FORCE));
        self.recoil_timer = Some(RECOIL_RESET);
        ContactOutcome::damage(Vec2::new(ctx.position.x, 0.0), 1)
    }

    fn on_animation_finished(&mut self, ctx: &mut EnemyContext, clip: &str) {
        if clip == HIT_CLIP {
            self.core.reset_damage();
            ctx.push(BodyCommand::SetVelocity(Vec2::ZERO));
        } else {
            self.core.handle_clip_end(ctx, clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use approx::assert_relative_eq;

    #[test]
    fn test_hangs_until_player_near() {
        let probe = FakeProbe::new();
        let mut bat = Bat::new(BatConfig::default(), Vec2::new(0.0, 5.0));
        let mut pos = bat.home();
        let commands = run(&mut bat, &mut pos, Some(player_at(10.0, 0.0)), &probe, 10);
        assert_eq!(bat.state(), BatState::Hanging);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_swoops_at_player() {
        let probe = FakeProbe::new();
        let mut bat = Bat::new(BatConfig::default(), Vec2::new(0.0, 3.0));
        let mut pos = bat.home();
        run(&mut bat, &mut pos, Some(player_at(0.0, 0.0)), &probe, 30);
        assert_eq!(bat.state(), BatState::Flying);
        assert_relative_eq!(pos.y, 1.5, epsilon = 1e-3);
    }

    #[test]
    fn test_returns_home_and_hangs() {
        let probe = FakeProbe::new();
        let mut bat = Bat::new(BatConfig::default(), Vec2::new(0.0, 3.0));
        let mut pos = bat.home();
        run(&mut bat, &mut pos, Some(player_at(0.0, 0.0)), &probe, 30);

        // Player leaves range
        run(&mut bat, &mut pos, Some(player_at(30.0, 0.0)), &probe, 1);
        assert_eq!(bat.state(), BatState::Returning);

        run(&mut bat, &mut pos, Some(player_at(30.0, 0.0)), &probe, 60);
        assert_eq!(bat.state(), BatState::Hanging);
        assert_eq!(pos, bat.home());
    }

    #[test]
    fn test_returns_when_player_dies() {
        let probe = FakeProbe::new();
        let mut bat = Bat::new(BatConfig::default(), Vec2::new(0.0, 3.0));
        let mut pos = bat.home();
        run(&mut bat, &mut pos, Some(player_at(0.0, 0.0)), &probe, 5);
        let mut dead = player_at(0.0, 0.0);
        dead.alive = false;
        run(&mut bat, &mut pos, Some(dead), &probe, 1);
        assert_eq!(bat.state(), BatState::Returning);
    }

    #[test]
    fn test_contact_recoils_and_hurts() {
        let probe = FakeProbe::new();
        let mut bat = Bat::new(BatConfig::default(), Vec2::new(0.0, 3.0));
        let mut ctx = EnemyContext::new(Vec2::new(1.0, 1.0), Vec2::ZERO, DT, 0.0, None, &probe);

        let outcome = bat.on_player_contact(&mut ctx, player_at(0.0, 1.0));
        assert_eq!(outcome, ContactOutcome::damage(Vec2::new(1.0, 0.0), 1));
        let recoil = impulses(&ctx.commands)[0];
        assert_relative_eq!(recoil.x, 40.0);
        assert_relative_eq!(recoil.y, 0.3 * 40.0);

        // Recoil velocity is cancelled half a second later
        let mut pos = Vec2::new(1.0, 1.0);
        let commands = run(&mut bat, &mut pos, None, &probe, 31);
        assert!(commands.contains(&BodyCommand::SetVelocity(Vec2::ZERO)));
    }
}
