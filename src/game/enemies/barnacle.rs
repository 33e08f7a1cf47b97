// Barnacle: stationary biter that strikes a player who gets too close

use glam::Vec2;
use log::debug;

use super::utils::is_player_in_range;
use super::{Damage, EnemyBehavior, EnemyContext, EnemyCore, EnemyKind, HIT_CLIP};
use crate::engine::animation::AnimationClip;
use crate::engine::physics::BodyCommand;

pub const HALF_WIDTH: f32 = 0.3;
pub const HALF_HEIGHT: f32 = 0.3;

const BITE_CLIP: &str = "bite";

#[derive(Debug, Clone)]
pub struct BarnacleConfig {
    pub hp: i32,
    pub knockback_force: f32,
    /// Player closer than this puts the barnacle on alert
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack_damage: u32,
}

impl Default for BarnacleConfig {
    fn default() -> Self {
        Self {
            hp: 2,
            knockback_force: 6.0,
            detection_range: 2.0,
            attack_range: 1.0,
            attack_cooldown: 2.0,
            attack_damage: 1,
        }
    }
}

#[derive(Debug)]
pub struct Barnacle {
    config: BarnacleConfig,
    core: EnemyCore,
    last_attack: Option<f64>,
    alert: bool,
}

impl Barnacle {
    pub fn new(config: BarnacleConfig) -> Self {
        let core = EnemyCore::new(config.hp, config.knockback_force, false)
            .with_clip(AnimationClip::one_shot(BITE_CLIP, 4, 12.0));
        Self {
            config,
            core,
            last_attack: None,
            alert: false,
        }
    }

    pub fn is_alert(&self) -> bool {
        self.alert
    }

    fn attack_ready(&self, now: f64) -> bool {
        self.last_attack
            .map_or(true, |t| now - t >= self.config.attack_cooldown as f64)
    }
}

impl EnemyBehavior for Barnacle {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Barnacle
    }

    fn core(&self) -> &EnemyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EnemyCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.alert = false;
        let Some(player) = ctx.live_player().filter(|_| self.core.is_alive()) else {
            return;
        };

        self.alert =
            is_player_in_range(ctx.position, player.position, self.config.detection_range);
        let in_reach = is_player_in_range(ctx.position, player.position, self.config.attack_range);
        if in_reach && self.attack_ready(ctx.time) {
            debug!("Barnacle attacks");
            self.last_attack = Some(ctx.time);
            ctx.player_damage = Some(Damage {
                source: Vec2::new(ctx.position.x, 0.0),
                amount: self.config.attack_damage,
            });
            if !self.core.damaged {
                self.core.animator.play_from_start(BITE_CLIP);
            }
        }
        self.core.animator.set_bool("alert", self.alert);
    }

    fn on_animation_finished(&mut self, ctx: &mut EnemyContext, clip: &str) {
        match clip {
            BITE_CLIP => self.core.play_state("idle"),
            HIT_CLIP => {
                self.core.reset_damage();
                ctx.push(BodyCommand::SetVelocity(Vec2::ZERO));
            }
            _ => self.core.handle_clip_end(ctx, clip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;

    fn step(barnacle: &mut Barnacle, probe: &FakeProbe, time: f64, player_x: f32) -> Option<Damage> {
        let mut ctx = EnemyContext::new(
            Vec2::ZERO,
            Vec2::ZERO,
            DT,
            time,
            Some(player_at(player_x, 0.0)),
            probe,
        );
        barnacle.step(&mut ctx);
        ctx.player_damage
    }

    #[test]
    fn test_bites_in_reach_with_cooldown() {
        let probe = FakeProbe::new();
        let mut barnacle = Barnacle::new(BarnacleConfig::default());

        let bite = step(&mut barnacle, &probe, 0.0, 0.8);
        assert_eq!(
            bite,
            Some(Damage {
                source: Vec2::ZERO,
                amount: 1
            })
        );
        assert!(step(&mut barnacle, &probe, 1.0, 0.8).is_none());
        assert!(step(&mut barnacle, &probe, 2.0, 0.8).is_some());
    }

    #[test]
    fn test_alert_but_out_of_reach() {
        let probe = FakeProbe::new();
        let mut barnacle = Barnacle::new(BarnacleConfig::default());
        assert!(step(&mut barnacle, &probe, 0.0, 1.5).is_none());
        assert!(barnacle.is_alert());
        step(&mut barnacle, &probe, 0.1, 5.0);
        assert!(!barnacle.is_alert());
    }

    #[test]
    fn test_stomp_hurts_player() {
        let probe = FakeProbe::new();
        let mut barnacle = Barnacle::new(BarnacleConfig::default());
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        let outcome = barnacle.on_player_contact(&mut ctx, player_at(0.0, 1.0));
        assert!(outcome.player_damage.is_some());
        assert_eq!(barnacle.core().hp, 2);
    }

    #[test]
    fn test_hit_recovery_stops_body() {
        let probe = FakeProbe::new();
        let mut barnacle = Barnacle::new(BarnacleConfig::default());
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        barnacle.on_weapon_hit(&mut ctx, Vec2::new(1.0, 0.0));
        ctx.commands.clear();
        barnacle.on_animation_finished(&mut ctx, HIT_CLIP);
        assert_eq!(ctx.commands, vec![BodyCommand::SetVelocity(Vec2::ZERO)]);
    }
}
