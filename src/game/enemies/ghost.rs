// Ghost: drifts through walls toward the player whenever the player looks away

use glam::Vec2;

use super::utils::{direction_to_player, is_player_looking_at};
use super::{ContactOutcome, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind, HIT_CLIP};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::BodyCommand;
use crate::game::player::PlayerView;

pub const RADIUS: f32 = 0.35;

#[derive(Debug, Clone)]
pub struct GhostConfig {
    pub hp: i32,
    pub chase_speed: f32,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            hp: 2,
            chase_speed: 2.0,
        }
    }
}

#[derive(Debug)]
pub struct Ghost {
    config: GhostConfig,
    core: EnemyCore,
    tracking: bool,
}

impl Ghost {
    pub fn new(config: GhostConfig) -> Self {
        let core = EnemyCore::new(config.hp, 0.0, false)
            .with_clip(AnimationClip::looping("float", 4, 6.0));
        Self {
            config,
            core,
            tracking: false,
        }
    }

    /// Moving toward the player this step
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}

impl EnemyBehavior for Ghost {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Ghost
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.tracking = false;
        if let Some(player) = ctx.live_player().filter(|_| self.core.is_alive()) {
            let watched = is_player_looking_at(player.position, player.facing, ctx.position);
            if !watched {
                self.tracking = true;
                if !self.core.damaged {
                    let dir = direction_to_player(ctx.position, player.position);
                    ctx.push(BodyCommand::Translate(dir * self.config.chase_speed * ctx.dt));
                    if dir.x > 0.0 {
                        self.core.facing = 1.0;
                    } else if dir.x < 0.0 {
                        self.core.facing = -1.0;
                    }
                }
            }
        }

        self.core.animator.set_bool("tracking", self.tracking);
        self.core.play_state("float");
    }

    fn on_player_contact(&mut self, ctx: &mut EnemyContext, _player: PlayerView) -> ContactOutcome {
        if !self.core.is_alive() {
            return ContactOutcome::none();
        }
        ContactOutcome::damage(ctx.position, 1)
    }

    fn on_weapon_hit(&mut self, ctx: &mut EnemyContext, _source: Vec2) {
        self.core.take_damage(ctx, None, 1);
    }

    fn on_animation_finished(&mut self, ctx: &mut EnemyContext, clip: &str) {
        // Kinematic body: nothing to stop after a hit
        if clip == HIT_CLIP {
            self.core.reset_damage();
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
    fn test_freezes_when_watched() {
        let probe = FakeProbe::new();
        let mut ghost = Ghost::new(GhostConfig::default());
        let mut pos = Vec2::new(3.0, 0.0);
        // Player at origin facing right, toward the ghost
        let commands = run(&mut ghost, &mut pos, Some(player_at(0.0, 0.0)), &probe, 30);
        assert!(commands.is_empty());
        assert!(!ghost.is_tracking());
    }

    #[test]
    fn test_chases_from_behind() {
        let probe = FakeProbe::new();
        let mut ghost = Ghost::new(GhostConfig::default());
        let mut pos = Vec2::new(-3.0, 0.0);
        run(&mut ghost, &mut pos, Some(player_at(0.0, 0.0)), &probe, 30);
        assert!(ghost.is_tracking());
        assert_relative_eq!(pos.x, -2.0, epsilon = 1e-3);
        assert_eq!(ghost.core().facing, 1.0);
    }

    #[test]
    fn test_contact_always_hurts() {
        let probe = FakeProbe::new();
        let mut ghost = Ghost::new(GhostConfig::default());
        let mut ctx = EnemyContext::new(Vec2::new(1.0, 2.0), Vec2::ZERO, DT, 0.0, None, &probe);
        let outcome = ghost.on_player_contact(&mut ctx, player_at(1.0, 3.0));
        assert_eq!(outcome, ContactOutcome::damage(Vec2::new(1.0, 2.0), 1));
    }

    #[test]
    fn test_weapon_hit_without_knockback() {
        let probe = FakeProbe::new();
        let mut ghost = Ghost::new(GhostConfig::default());
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        ghost.on_weapon_hit(&mut ctx, Vec2::new(-0.5, 0.0));
        assert_eq!(ghost.core().hp, 1);
        assert!(ctx.commands.is_empty());

        ghost.on_animation_finished(&mut ctx, HIT_CLIP);
        assert!(!ghost.core().damaged);
        assert!(ctx.commands.is_empty());
    }
}
