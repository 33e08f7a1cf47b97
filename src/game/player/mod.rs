// Player controller
//
// The player reads the smoothed input axis, senses the ground through a
// `Probe`, and queues body commands that the level applies before the
// physics step.

pub mod state;
pub mod stats;

pub use state::{PlayerState, PlayerStateMachine};
pub use stats::PlayerStats;

use glam::Vec2;
use log::{debug, info};

use crate::core::EntityId;
use crate::engine::animation::{AnimationClip, Animator};
use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{
    presets, BodyCommand, ColliderHandle, CollisionGroups, PhysicsWorld, Probe, RigidBodyHandle,
};

/// What enemies get to know about the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    pub alive: bool,
}

/// An active weapon swing
#[derive(Debug, Clone)]
struct WeaponSwing {
    remaining: f32,
    /// Enemies already struck by this swing
    struck: Vec<EntityId>,
}

#[derive(Debug)]
pub struct Player {
    pub id: EntityId,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub stats: PlayerStats,
    pub state_machine: PlayerStateMachine,
    pub animator: Animator,

    hp: u32,
    damaged: bool,
    grounded: bool,
    facing: f32,
    position: Vec2,
    velocity: Vec2,
    weapon: Option<WeaponSwing>,
    commands: Vec<BodyCommand>,
}

impl Player {
    /// Create the player and add its body to the physics world
    pub fn spawn(physics: &mut PhysicsWorld, id: EntityId, stats: PlayerStats, at: Vec2) -> Self {
        let (body_handle, collider_handle) = physics.spawn(
            id,
            presets::player_body(at.x, at.y),
            presets::player_collider(stats.width, stats.height),
        );
        let mut player = Self::detached(id, body_handle, collider_handle, stats);
        player.position = at;
        player
    }

    fn detached(
        id: EntityId,
        body_handle: RigidBodyHandle,
        collider_handle: ColliderHandle,
        stats: PlayerStats,
    ) -> Self {
        let animator = Animator::with_clips(vec![
            AnimationClip::looping("idle", 4, 8.0),
            AnimationClip::looping("run", 6, 12.0),
            AnimationClip::looping("jump", 2, 8.0),
            AnimationClip::timed("hurt", stats.hurt_duration),
            AnimationClip::timed("dead", 1.0),
        ]);

        Self {
            id,
            body_handle,
            collider_handle,
            hp: stats.max_hp,
            stats,
            state_machine: PlayerStateMachine::new(),
            animator,
            damaged: false,
            grounded: false,
            facing: 1.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            weapon: None,
            commands: Vec::new(),
        }
    }

    /// Copy the body state read back from the physics world
    pub fn sync(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Per fixed step: movement, ground check, jump, weapon and animation
    pub fn update(&mut self, input: &mut PlayerInput, probe: &dyn Probe, dt: f32) {
        input.update_axis(dt);
        let alive = !self.is_dead();

        let axis = if alive { input.horizontal_axis() } else { 0.0 };
        let step = axis * self.stats.speed * dt;
        if step > 0.0 {
            self.facing = 1.0;
        } else if step < 0.0 {
            self.facing = -1.0;
        }
        if alive && !self.damaged && step != 0.0 {
            self.commands.push(BodyCommand::Translate(Vec2::new(step, 0.0)));
        }

        self.grounded = self.check_ground(probe);

        if alive
            && self.grounded
            && !self.damaged
            && input.consume_buffered(Action::Jump)
        {
            self.commands
                .push(BodyCommand::Impulse(Vec2::new(0.0, self.stats.jump_force)));
        }

        self.update_weapon(input, dt);

        self.state_machine.update(self.grounded, step != 0.0, self.damaged);
        self.update_animation(axis, dt);
    }

    fn check_ground(&self, probe: &dyn Probe) -> bool {
        let origin = self.position + Vec2::new(self.stats.offset_x, self.stats.offset_y);
        [CollisionGroups::Terrain, CollisionGroups::Hazard]
            .iter()
            .any(|group| {
                probe.box_hits_below(origin, self.stats.ray_width, self.stats.ray_length, *group)
            })
    }

    fn update_weapon(&mut self, input: &mut PlayerInput, dt: f32) {
        if let Some(swing) = &mut self.weapon {
            swing.remaining -= dt;
            if swing.remaining <= 0.0 {
                self.weapon = None;
            }
        }

        if self.weapon.is_none()
            && self.state_machine.state().can_attack()
            && !self.damaged
            && input.consume_buffered(Action::Attack)
        {
            debug!("Player swings weapon");
            self.weapon = Some(WeaponSwing {
                remaining: self.stats.weapon_duration,
                struck: Vec::new(),
            });
        }
    }

    fn update_animation(&mut self, axis: f32, dt: f32) {
        self.animator
            .set_float("movement", axis * self.stats.speed);
        self.animator.set_bool("grounded", self.grounded);
        self.animator.set_bool("damaged", self.damaged);
        self.animator.set_flip_horizontal(self.facing < 0.0);

        let state = self.state_machine.state();
        self.animator.play(state.animation_name());

        if let Some(clip) = self.animator.update(dt) {
            if clip == "hurt" {
                self.reset_damage();
            }
        }
    }

    /// Take damage from `source`. Ignored while already hurt or dead.
    /// Returns true if the hit landed.
    pub fn get_damage(&mut self, source: Vec2, amount: u32) -> bool {
        if self.damaged || self.is_dead() {
            return false;
        }

        self.damaged = true;
        self.hp = self.hp.saturating_sub(amount);

        let away = Vec2::new(self.position.x - source.x, 1.0).normalize_or_zero();
        self.commands
            .push(BodyCommand::Impulse(away * self.stats.knockback_force));

        if self.hp == 0 {
            self.die();
        } else {
            info!("Player hit for {amount}, {} hp left", self.hp);
            self.state_machine.hurt();
            self.animator.play_from_start("hurt");
        }
        true
    }

    /// End of the hurt clip
    pub fn reset_damage(&mut self) {
        self.damaged = false;
        self.commands.push(BodyCommand::SetVelocity(Vec2::ZERO));
    }

    /// Restore hit points, capped at `max_hp`
    pub fn heal(&mut self, amount: u32) {
        if self.is_dead() {
            return;
        }
        self.hp = (self.hp + amount).min(self.stats.max_hp);
        info!("Player healed to {} hp", self.hp);
    }

    /// Stomp rebound: cancel vertical speed, then kick upwards
    pub fn bounce(&mut self, force: f32) {
        self.commands.push(BodyCommand::SetVelocityY(0.0));
        self.commands
            .push(BodyCommand::Impulse(Vec2::new(0.0, force)));
    }

    /// Instant death (fell out of the level)
    pub fn kill(&mut self) {
        if self.is_dead() {
            return;
        }
        self.hp = 0;
        self.die();
    }

    fn die(&mut self) {
        info!("Player died");
        self.state_machine.die();
        self.animator.play_from_start("dead");
        self.weapon = None;
    }

    /// Center and half extents of the weapon hitbox while swinging
    pub fn weapon_hitbox(&self) -> Option<(Vec2, Vec2)> {
        self.weapon.as_ref().map(|_| {
            let center = self.position + Vec2::new(self.facing * self.stats.weapon_reach, 0.0);
            let half = Vec2::new(self.stats.weapon_width, self.stats.weapon_height) / 2.0;
            (center, half)
        })
    }

    /// Record a weapon hit on `enemy`. Returns false if this swing already struck it.
    pub fn register_weapon_hit(&mut self, enemy: EntityId) -> bool {
        match &mut self.weapon {
            Some(swing) if !swing.struck.contains(&enemy) => {
                swing.struck.push(enemy);
                true
            }
            _ => false,
        }
    }

    pub fn take_commands(&mut self) -> Vec<BodyCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            facing: self.facing,
            alive: !self.is_dead(),
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.state_machine.state() == PlayerState::Dead
    }

    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}
