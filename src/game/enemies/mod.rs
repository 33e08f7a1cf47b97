// Enemy controllers
//
// Every enemy is a behavior object updated once per fixed step. It reads the
// world through an `EnemyContext` (its own body state, the player and a
// `Probe`) and answers with body commands; it never touches the physics
// world directly.

pub mod barnacle;
pub mod bat;
pub mod frog;
pub mod ghost;
pub mod lava;
pub mod mouse;
pub mod saw;
pub mod slime;
pub mod snake;
pub mod spider;
pub mod thwomp;
pub mod utils;

pub use barnacle::{Barnacle, BarnacleConfig};
pub use bat::{Bat, BatConfig};
pub use frog::{Frog, FrogConfig};
pub use ghost::{Ghost, GhostConfig};
pub use lava::{Lava, LavaConfig};
pub use mouse::{Mouse, MouseConfig};
pub use saw::{Saw, SawConfig, SawPath};
pub use slime::{Slime, SlimeConfig};
pub use snake::{Snake, SnakeConfig};
pub use spider::{Spider, SpiderConfig};
pub use thwomp::{Thwomp, ThwompConfig};

use std::fmt;

use glam::Vec2;
use log::debug;
use rapier2d::prelude::{Collider, RigidBody};

use super::player::PlayerView;
use crate::engine::animation::{AnimationClip, Animator};
use crate::engine::physics::{presets, BodyCommand, Probe};

/// How far the player's center must be above an enemy's top to stomp it
pub const STOMP_MARGIN: f32 = 0.2;

/// Collider half-height assumed until `spawn` measures the real one
pub const DEFAULT_HALF_HEIGHT: f32 = 0.25;

/// Upward impulse given to the player after a stomp
pub const STOMP_BOUNCE: f32 = 7.0;

pub const HIT_CLIP: &str = "hit";
pub const DEATH_CLIP: &str = "death";

/// Damage dealt to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damage {
    /// Knockback pushes the player away from this point
    pub source: Vec2,
    pub amount: u32,
}

/// Effect of a player contact on the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactOutcome {
    pub player_damage: Option<Damage>,
    /// Stomp rebound impulse
    pub bounce_player: Option<f32>,
}

impl ContactOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn damage(source: Vec2, amount: u32) -> Self {
        Self {
            player_damage: Some(Damage { source, amount }),
            bounce_player: None,
        }
    }

    pub fn bounce(force: f32) -> Self {
        Self {
            player_damage: None,
            bounce_player: Some(force),
        }
    }
}

/// Everything an enemy sees during one callback
pub struct EnemyContext<'a> {
    pub position: Vec2,
    pub velocity: Vec2,
    pub dt: f32,
    /// Simulated seconds since the game started
    pub time: f64,
    pub player: Option<PlayerView>,
    pub probe: &'a dyn Probe,
    /// Body commands to apply after the callback
    pub commands: Vec<BodyCommand>,
    /// Damage the enemy deals to the player outside of a contact (attacks)
    pub player_damage: Option<Damage>,
}

impl<'a> EnemyContext<'a> {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        dt: f32,
        time: f64,
        player: Option<PlayerView>,
        probe: &'a dyn Probe,
    ) -> Self {
        Self {
            position,
            velocity,
            dt,
            time,
            player,
            probe,
            commands: Vec::new(),
            player_damage: None,
        }
    }

    pub fn push(&mut self, command: BodyCommand) {
        self.commands.push(command);
    }

    /// The player, if present and alive
    pub fn live_player(&self) -> Option<PlayerView> {
        self.player.filter(|p| p.alive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Slime,
    Snake,
    Mouse,
    Spider,
    Frog,
    Ghost,
    Bat,
    Barnacle,
    Thwomp,
    Saw,
    HalfSaw,
    Lava,
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Hit points, damage flags, facing and animation shared by all enemies
#[derive(Debug)]
pub struct EnemyCore {
    pub hp: i32,
    /// Set for the step a hit landed
    pub hit: bool,
    /// Set until the hit clip ends; further damage is ignored meanwhile
    pub damaged: bool,
    /// 1.0 right, -1.0 left
    pub facing: f32,
    pub knockback_force: f32,
    pub can_be_squished: bool,
    /// Half the collider height, used to find the enemy's top
    pub half_height: f32,
    pub animator: Animator,
    destroyed: bool,
}

impl EnemyCore {
    pub fn new(hp: i32, knockback_force: f32, can_be_squished: bool) -> Self {
        Self {
            hp,
            hit: false,
            damaged: false,
            facing: 1.0,
            knockback_force,
            can_be_squished,
            half_height: DEFAULT_HALF_HEIGHT,
            animator: Animator::with_clips(vec![
                AnimationClip::looping("idle", 4, 8.0),
                AnimationClip::timed(HIT_CLIP, 0.3),
                AnimationClip::timed(DEATH_CLIP, 0.5),
            ]),
            destroyed: false,
        }
    }

    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.animator.add_clip(clip);
        self
    }

    pub fn facing_left(mut self) -> Self {
        self.facing = -1.0;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Take damage. `source` gives the knockback origin; `None` means no knockback.
    /// Returns true if the damage landed.
    pub fn take_damage(
        &mut self,
        ctx: &mut EnemyContext,
        source: Option<Vec2>,
        amount: i32,
    ) -> bool {
        if self.damaged || !self.is_alive() {
            return false;
        }

        self.damaged = true;
        self.hit = true;
        self.hp -= amount;

        if self.is_alive() {
            if let Some(source) = source {
                let away = Vec2::new(ctx.position.x - source.x, 0.2).normalize_or_zero();
                ctx.push(BodyCommand::Impulse(away * self.knockback_force));
            }
            self.animator.play_from_start(HIT_CLIP);
        } else {
            self.animator.play_from_start(DEATH_CLIP);
        }
        true
    }

    pub fn reset_damage(&mut self) {
        self.damaged = false;
    }

    /// Shared end-of-clip handling: hit clip clears damage, death clip despawns
    pub fn handle_clip_end(&mut self, ctx: &mut EnemyContext, clip: &str) {
        match clip {
            HIT_CLIP => {
                self.reset_damage();
                ctx.push(BodyCommand::SetVelocityX(0.0));
            }
            DEATH_CLIP => {
                debug!("Enemy death clip finished, despawning");
                self.destroyed = true;
            }
            _ => {}
        }
    }

    /// Play a movement clip unless a hit or death clip owns the animator
    pub fn play_state(&mut self, clip: &str) {
        if !self.damaged && self.is_alive() {
            self.animator.play(clip);
        }
    }

    /// Push per-step flags to the animator and clear the one-step `hit` flag
    pub fn end_frame(&mut self) {
        self.animator.set_bool("hit", self.hit);
        self.animator.set_int("hp", self.hp);
        self.animator.set_flip_horizontal(self.facing < 0.0);
        self.hit = false;
    }
}

/// Player landing on top of a squishable enemy centered at `position`
pub fn is_stomp(core: &EnemyCore, position: Vec2, player: PlayerView) -> bool {
    core.can_be_squished && player.position.y > position.y + core.half_height + STOMP_MARGIN
}

/// Shared stomp rule: squishable enemies take a hit from above and bounce the
/// player; any other touch hurts the player.
pub fn resolve_contact(
    core: &mut EnemyCore,
    ctx: &mut EnemyContext,
    player: PlayerView,
) -> ContactOutcome {
    if !core.is_alive() {
        return ContactOutcome::none();
    }
    if is_stomp(core, ctx.position, player) {
        core.take_damage(ctx, None, 1);
        ContactOutcome::bounce(STOMP_BOUNCE)
    } else {
        ContactOutcome::damage(Vec2::new(ctx.position.x, 0.0), 1)
    }
}

/// Behavior of one enemy variant
pub trait EnemyBehavior: fmt::Debug {
    fn kind(&self) -> EnemyKind;

    fn core(&self) -> &EnemyCore;

    fn core_mut(&mut self) -> &mut EnemyCore;

    /// AI for one fixed step
    fn update(&mut self, ctx: &mut EnemyContext);

    fn on_player_contact(&mut self, ctx: &mut EnemyContext, player: PlayerView) -> ContactOutcome {
        resolve_contact(self.core_mut(), ctx, player)
    }

    /// Struck by the player's weapon at `source`
    fn on_weapon_hit(&mut self, ctx: &mut EnemyContext, source: Vec2) {
        self.core_mut()
            .take_damage(ctx, Some(Vec2::new(source.x, 0.0)), 1);
    }

    fn on_animation_finished(&mut self, ctx: &mut EnemyContext, clip: &str) {
        self.core_mut().handle_clip_end(ctx, clip);
    }

    fn is_destroyed(&self) -> bool {
        self.core().is_destroyed()
    }

    /// Full fixed step: AI, animation playback and its end-of-clip events
    fn step(&mut self, ctx: &mut EnemyContext) {
        self.update(ctx);
        if let Some(clip) = self.core_mut().animator.update(ctx.dt) {
            self.on_animation_finished(ctx, &clip);
        }
        self.core_mut().end_frame();
    }
}

/// Level-authored enemy placement
#[derive(Debug, Clone)]
pub enum EnemyConfig {
    Slime(SlimeConfig),
    Snake(SnakeConfig),
    Mouse(MouseConfig),
    Spider(SpiderConfig),
    Frog(FrogConfig),
    Ghost(GhostConfig),
    Bat(BatConfig),
    Barnacle(BarnacleConfig),
    Thwomp(ThwompConfig),
    Saw(SawConfig),
    Lava(LavaConfig),
}

/// An enemy ready to be inserted into the physics world
pub struct SpawnedEnemy {
    pub body: RigidBody,
    pub collider: Collider,
    pub behavior: Box<dyn EnemyBehavior>,
}

impl EnemyConfig {
    pub fn spawn(&self, at: Vec2) -> SpawnedEnemy {
        let (body, collider, behavior): (RigidBody, Collider, Box<dyn EnemyBehavior>) = match self {
            Self::Slime(config) => (
                presets::walker_body(at.x, at.y),
                presets::walker_collider(slime::HALF_WIDTH, slime::HALF_HEIGHT),
                Box::new(Slime::new(config.clone())),
            ),
            Self::Snake(config) => (
                presets::walker_body(at.x, at.y),
                presets::walker_collider(snake::HALF_WIDTH, snake::HALF_HEIGHT),
                Box::new(Snake::new(config.clone())),
            ),
            Self::Mouse(config) => (
                presets::walker_body(at.x, at.y),
                presets::walker_collider(mouse::HALF_WIDTH, mouse::HALF_HEIGHT),
                Box::new(Mouse::new(config.clone())),
            ),
            Self::Spider(config) => (
                presets::walker_body(at.x, at.y),
                presets::walker_collider(spider::HALF_WIDTH, spider::HALF_HEIGHT),
                Box::new(Spider::new(config.clone())),
            ),
            Self::Frog(config) => (
                presets::walker_body(at.x, at.y),
                presets::walker_collider(frog::HALF_WIDTH, frog::HALF_HEIGHT),
                Box::new(Frog::new(config.clone())),
            ),
            Self::Ghost(config) => (
                presets::ghost_body(at.x, at.y),
                presets::ghost_collider(ghost::RADIUS),
                Box::new(Ghost::new(config.clone())),
            ),
            Self::Bat(config) => (
                presets::flyer_body(at.x, at.y),
                presets::flyer_collider(bat::RADIUS, bat::MASS),
                Box::new(Bat::new(config.clone(), at)),
            ),
            Self::Barnacle(config) => (
                presets::walker_body(at.x, at.y),
                presets::walker_collider(barnacle::HALF_WIDTH, barnacle::HALF_HEIGHT),
                Box::new(Barnacle::new(config.clone())),
            ),
            Self::Thwomp(config) => (
                presets::hazard_body(at.x, at.y),
                presets::hazard_box(thwomp::SIZE, thwomp::SIZE),
                Box::new(Thwomp::new(config.clone(), at)),
            ),
            Self::Saw(config) => (
                presets::hazard_body(at.x, at.y),
                presets::hazard_circle(saw::RADIUS),
                Box::new(Saw::new(config.clone(), at)),
            ),
            Self::Lava(config) => (
                presets::hazard_body(at.x, at.y),
                presets::hazard_zone(config.width, config.base_height),
                Box::new(Lava::new(config.clone(), at)),
            ),
        };

        let mut behavior = behavior;
        behavior.core_mut().half_height = collider.compute_aabb().half_extents().y;

        SpawnedEnemy {
            body,
            collider,
            behavior,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::engine::physics::probe::testing::FakeProbe;
    use approx::assert_relative_eq;

    #[test]
    fn test_take_damage_with_knockback() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(2, 6.0, true);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);

        assert!(core.take_damage(&mut ctx, Some(Vec2::new(1.0, 0.0)), 1));
        assert_eq!(core.hp, 1);
        assert!(core.hit);
        assert!(core.damaged);
        let knock = impulses(&ctx.commands)[0];
        let expected = Vec2::new(-1.0, 0.2).normalize() * 6.0;
        assert_relative_eq!(knock.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(knock.y, expected.y, epsilon = 1e-5);

        // Ignored until the hit clip ends
        assert!(!core.take_damage(&mut ctx, Some(Vec2::ZERO), 1));
        assert_eq!(core.hp, 1);
    }

    #[test]
    fn test_lethal_damage_has_no_knockback() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(1, 6.0, true);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        core.take_damage(&mut ctx, Some(Vec2::new(1.0, 0.0)), 1);
        assert!(ctx.commands.is_empty());
        assert_eq!(core.animator.current(), DEATH_CLIP);
    }

    #[test]
    fn test_clip_end_events() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(2, 6.0, true);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        core.take_damage(&mut ctx, None, 1);
        core.handle_clip_end(&mut ctx, HIT_CLIP);
        assert!(!core.damaged);
        assert_eq!(ctx.commands, vec![BodyCommand::SetVelocityX(0.0)]);

        core.handle_clip_end(&mut ctx, DEATH_CLIP);
        assert!(core.is_destroyed());
    }

    #[test]
    fn test_end_frame_clears_hit() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(2, 6.0, true);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        core.take_damage(&mut ctx, None, 1);
        core.end_frame();
        assert!(!core.hit);
        assert_eq!(core.animator.get_bool("hit"), Some(true));
        assert_eq!(core.animator.get_int("hp"), Some(1));
    }

    #[test]
    fn test_stomp_from_above() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(2, 6.0, true);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);

        let outcome = resolve_contact(&mut core, &mut ctx, player_at(0.0, 0.8));
        assert_eq!(outcome, ContactOutcome::bounce(STOMP_BOUNCE));
        assert_eq!(core.hp, 1);
    }

    #[test]
    fn test_side_contact_hurts_player() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(2, 6.0, true);
        let mut ctx = EnemyContext::new(Vec2::new(2.0, 0.0), Vec2::ZERO, DT, 0.0, None, &probe);

        let outcome = resolve_contact(&mut core, &mut ctx, player_at(1.5, 0.25));
        assert_eq!(outcome, ContactOutcome::damage(Vec2::new(2.0, 0.0), 1));
        assert_eq!(core.hp, 2);
    }

    #[test]
    fn test_stomp_line_follows_collider_height() {
        let frog = EnemyConfig::Frog(FrogConfig::default()).spawn(Vec2::ZERO);
        let core = frog.behavior.core();
        assert_relative_eq!(core.half_height, frog::HALF_HEIGHT, epsilon = 1e-5);

        // Standing on the frog's floor vs. resting on its top edge
        let beside = player_at(0.7, 0.5 - frog::HALF_HEIGHT);
        let landed = player_at(0.0, frog::HALF_HEIGHT + 0.45);
        assert!(!is_stomp(core, Vec2::ZERO, beside));
        assert!(is_stomp(core, Vec2::ZERO, landed));
    }

    #[test]
    fn test_unsquishable_hurts_from_above() {
        let probe = FakeProbe::new();
        let mut core = EnemyCore::new(2, 6.0, false);
        let mut ctx = EnemyContext::new(Vec2::ZERO, Vec2::ZERO, DT, 0.0, None, &probe);
        let outcome = resolve_contact(&mut core, &mut ctx, player_at(0.0, 0.8));
        assert!(outcome.player_damage.is_some());
        assert_eq!(outcome.bounce_player, None);
    }

    #[test]
    fn test_spawn_builds_every_variant() {
        let configs = vec![
            EnemyConfig::Slime(SlimeConfig::default()),
            EnemyConfig::Snake(SnakeConfig::default()),
            EnemyConfig::Mouse(MouseConfig::default()),
            EnemyConfig::Spider(SpiderConfig::default()),
            EnemyConfig::Frog(FrogConfig::default()),
            EnemyConfig::Ghost(GhostConfig::default()),
            EnemyConfig::Bat(BatConfig::default()),
            EnemyConfig::Barnacle(BarnacleConfig::default()),
            EnemyConfig::Thwomp(ThwompConfig::default()),
            EnemyConfig::Saw(SawConfig::default()),
            EnemyConfig::Lava(LavaConfig::default()),
        ];
        let kinds: Vec<EnemyKind> = configs
            .iter()
            .map(|c| c.spawn(Vec2::ZERO).behavior.kind())
            .collect();
        assert_eq!(kinds.len(), 11);
        assert!(kinds.contains(&EnemyKind::Thwomp));
        assert!(kinds.contains(&EnemyKind::Lava));
    }
}
