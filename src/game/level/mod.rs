// Level runtime
//
// A `Level` owns the physics world and everything a blueprint placed in it.
// Each fixed step runs in a fixed order: player, enemies, physics, contacts,
// weapon hits, objectives, rules, timers, camera. Body commands queued by
// controllers are applied before the physics step that consumes them.

pub mod blueprint;
pub mod catalog;

pub use blueprint::{LevelBlueprint, Platform, PropPlacement};

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;

use super::collectables::CollectableItem;
use super::enemies::{ContactOutcome, Damage, EnemyBehavior, EnemyConfig, EnemyContext};
use super::objectives::LevelObjectives;
use super::player::{Player, PlayerStats, PlayerView};
use super::props::{LockedBlock, VictoryFlag, WinFlag, UNLOCK_DESPAWN_DELAY, VICTORY_DELAY};
use super::rules::{GameRules, RuleOutcome, RESULT_DELAY};
use super::session::GameSession;
use crate::core::{EntityId, GameError, GameResult};
use crate::engine::camera::Camera;
use crate::engine::input::PlayerInput;
use crate::engine::physics::{
    presets, ColliderHandle, CollisionEvent, PhysicsWorld, RigidBodyHandle, WorldProbe,
};
use crate::engine::timers::Timers;

pub const PLAYER_ID: EntityId = 1;

pub const PICKUP_RADIUS: f32 = 0.3;
pub const FLAG_SIZE: Vec2 = Vec2::new(0.6, 2.0);
pub const LOCKED_BLOCK_SIZE: f32 = 1.0;

/// Camera looks slightly above the player
const CAMERA_OFFSET: Vec2 = Vec2::new(0.0, 1.5);

/// Delayed level events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    RemoveProp(EntityId),
    Won,
    Lost,
}

struct EnemySlot {
    id: EntityId,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    behavior: Box<dyn EnemyBehavior>,
}

struct PickupSlot {
    id: EntityId,
    body: RigidBodyHandle,
    item: CollectableItem,
}

#[derive(Debug)]
pub enum Prop {
    LockedBlock(LockedBlock),
    VictoryFlag(VictoryFlag),
    WinFlag(WinFlag),
}

struct PropSlot {
    id: EntityId,
    body: RigidBodyHandle,
    prop: Prop,
}

pub struct Level {
    number: u32,
    name: String,
    physics: PhysicsWorld,
    player: Player,
    enemies: Vec<EnemySlot>,
    pickups: Vec<PickupSlot>,
    props: Vec<PropSlot>,
    objectives: Option<LevelObjectives>,
    rules: GameRules,
    timers: Timers<LevelEvent>,
    camera: Camera,
    kill_plane: f32,
    next_id: EntityId,
}

impl Level {
    /// Build built-in level `number`
    pub fn from_catalog<R: Rng>(number: u32, rng: &mut R) -> GameResult<Self> {
        let blueprint = catalog::blueprint(number)?;
        Ok(Self::load(number, blueprint, rng))
    }

    /// Populate a fresh physics world from `blueprint`. `rng` places the
    /// output of collectable spawners.
    pub fn load<R: Rng>(number: u32, blueprint: LevelBlueprint, rng: &mut R) -> Self {
        let LevelBlueprint {
            name,
            spawn,
            platforms,
            enemies,
            collectables,
            spawners,
            props,
            objectives,
            rules,
            kill_plane,
        } = blueprint;

        let mut physics = PhysicsWorld::new();
        let player = Player::spawn(&mut physics, PLAYER_ID, PlayerStats::standard(), spawn);

        let mut camera = Camera::new(spawn).with_offset(CAMERA_OFFSET);
        camera.snap_to(spawn);

        let mut level = Self {
            number,
            name,
            physics,
            player,
            enemies: Vec::new(),
            pickups: Vec::new(),
            props: Vec::new(),
            objectives: objectives.map(LevelObjectives::new),
            rules,
            timers: Timers::new(),
            camera,
            kill_plane,
            next_id: PLAYER_ID + 1,
        };

        for platform in platforms {
            level.spawn_platform(platform);
        }
        for placement in enemies {
            level.spawn_enemy(placement.position, &placement.config);
        }
        let spawned: Vec<CollectableItem> = spawners
            .iter()
            .flat_map(|spawner| spawner.spawn(&mut *rng))
            .collect();
        for item in collectables.into_iter().chain(spawned) {
            level.spawn_pickup(item);
        }
        for placement in props {
            level.spawn_prop(placement);
        }

        info!(
            "Level {} '{}' loaded: {} enemies, {} collectables, {} props",
            level.number,
            level.name,
            level.enemies.len(),
            level.pickups.len(),
            level.props.len()
        );
        if let Some(objectives) = &level.objectives {
            objectives.log_report();
        }
        level
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_platform(&mut self, platform: Platform) {
        let id = self.allocate_id();
        self.physics.spawn(
            id,
            presets::terrain_body(platform.center.x, platform.center.y),
            presets::terrain_collider(platform.size.x, platform.size.y),
        );
    }

    fn spawn_enemy(&mut self, at: Vec2, config: &EnemyConfig) {
        let id = self.allocate_id();
        let spawned = config.spawn(at);
        let (body, collider) = self.physics.spawn(id, spawned.body, spawned.collider);
        debug!("Spawned {} #{id} at {at}", spawned.behavior.kind());
        self.enemies.push(EnemySlot {
            id,
            body,
            collider,
            behavior: spawned.behavior,
        });
    }

    fn spawn_pickup(&mut self, item: CollectableItem) {
        let id = self.allocate_id();
        let (body, _) = self.physics.spawn(
            id,
            presets::terrain_body(item.position.x, item.position.y),
            presets::pickup_collider(PICKUP_RADIUS),
        );
        self.pickups.push(PickupSlot { id, body, item });
    }

    fn spawn_prop(&mut self, placement: PropPlacement) {
        let id = self.allocate_id();
        let at = placement.position();
        let (collider, prop) = match placement {
            PropPlacement::LockedBlock { keys_required, .. } => (
                presets::terrain_collider(LOCKED_BLOCK_SIZE, LOCKED_BLOCK_SIZE),
                Prop::LockedBlock(LockedBlock::new(keys_required)),
            ),
            PropPlacement::VictoryFlag {
                require_objectives, ..
            } => (
                presets::trigger_collider(FLAG_SIZE.x, FLAG_SIZE.y),
                Prop::VictoryFlag(VictoryFlag::new(
                    require_objectives,
                    self.objectives.is_some(),
                )),
            ),
            PropPlacement::WinFlag { .. } => (
                presets::trigger_collider(FLAG_SIZE.x, FLAG_SIZE.y),
                Prop::WinFlag(WinFlag),
            ),
        };
        let (body, _) = self.physics.spawn(id, presets::terrain_body(at.x, at.y), collider);
        self.props.push(PropSlot { id, body, prop });
    }

    /// One fixed step. `time` is the simulated clock used for enemy cooldowns.
    pub fn fixed_update(
        &mut self,
        input: &mut PlayerInput,
        session: &mut GameSession,
        dt: f32,
        time: f64,
    ) {
        self.rules.begin(session.score());
        self.update_player(input, dt);
        self.update_enemies(dt, time);
        self.flush_player_commands();

        self.physics.step();
        self.sync_player();

        self.dispatch_collisions(session, dt, time);
        self.resolve_weapon_hits(dt, time);

        self.update_objectives(session);
        self.check_rules(session, dt);
        self.run_timers(session, dt);

        self.camera.follow(self.player.position());
    }

    fn sync_player(&mut self) {
        let body = self.player.body_handle;
        if let (Some(position), Some(velocity)) = (
            self.physics.body_position(body),
            self.physics.body_velocity(body),
        ) {
            self.player.sync(position, velocity);
        }
    }

    fn update_player(&mut self, input: &mut PlayerInput, dt: f32) {
        self.sync_player();
        let probe = WorldProbe::new(&self.physics, Some(self.player.body_handle));
        self.player.update(input, &probe, dt);
    }

    fn flush_player_commands(&mut self) {
        for command in self.player.take_commands() {
            self.physics
                .apply_command(self.player.body_handle, self.player.collider_handle, command);
        }
    }

    fn update_enemies(&mut self, dt: f32, time: f64) {
        let view = self.player.view();
        for slot in &mut self.enemies {
            let stepped = drive_enemy(&mut self.physics, slot, view, dt, time, |behavior, ctx| {
                behavior.step(ctx)
            });
            match stepped {
                Some(((), Some(damage))) => hurt_player(&mut self.player, damage),
                Some(_) => {}
                None => warn!("{}", GameError::MissingBody(slot.id)),
            }
        }

        let physics = &mut self.physics;
        self.enemies.retain(|slot| {
            if slot.behavior.is_destroyed() {
                info!("{} #{} defeated", slot.behavior.kind(), slot.id);
                physics.remove_rigid_body(slot.body);
                false
            } else {
                true
            }
        });
    }

    fn dispatch_collisions(&mut self, session: &mut GameSession, dt: f32, time: f64) {
        let player_collider = self.player.collider_handle;
        for event in self.physics.get_collision_events() {
            let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };
            let other = if collider1 == player_collider {
                collider2
            } else if collider2 == player_collider {
                collider1
            } else {
                continue;
            };
            if self.player.is_dead() {
                return;
            }
            if let Some(entity) = self.physics.entity_for_collider(other) {
                self.touch(entity, session, dt, time);
            }
        }
    }

    fn touch(&mut self, entity: EntityId, session: &mut GameSession, dt: f32, time: f64) {
        if let Some(index) = self.enemies.iter().position(|s| s.id == entity) {
            self.touch_enemy(index, dt, time);
        } else if let Some(index) = self.pickups.iter().position(|s| s.id == entity) {
            self.collect(index, session);
        } else if let Some(index) = self.props.iter().position(|s| s.id == entity) {
            self.touch_prop(index, session);
        }
    }

    fn touch_enemy(&mut self, index: usize, dt: f32, time: f64) {
        let view = self.player.view();
        let slot = &mut self.enemies[index];
        let Some((outcome, damage)) =
            drive_enemy(&mut self.physics, slot, view, dt, time, |behavior, ctx| {
                behavior.on_player_contact(ctx, view)
            })
        else {
            return;
        };

        let ContactOutcome {
            player_damage,
            bounce_player,
        } = outcome;
        if let Some(force) = bounce_player {
            debug!("Stomped {} #{}", slot.behavior.kind(), slot.id);
            self.player.bounce(force);
        }
        for damage in player_damage.into_iter().chain(damage) {
            hurt_player(&mut self.player, damage);
        }
    }

    fn collect(&mut self, index: usize, session: &mut GameSession) {
        let mut slot = self.pickups.swap_remove(index);
        if let Some(pickup) = slot.item.collect(session) {
            if pickup.heal > 0 {
                self.player.heal(pickup.heal);
            }
        }
        self.physics.remove_rigid_body(slot.body);
    }

    fn touch_prop(&mut self, index: usize, session: &mut GameSession) {
        let objectives = self.objectives.as_ref();
        let slot = &mut self.props[index];
        match &mut slot.prop {
            Prop::LockedBlock(block) => {
                if block.on_player_contact(session) {
                    self.timers
                        .schedule(UNLOCK_DESPAWN_DELAY, LevelEvent::RemoveProp(slot.id));
                }
            }
            Prop::VictoryFlag(flag) => {
                if flag.on_player_enter(objectives) && self.rules.force_win().is_some() {
                    self.timers.schedule(VICTORY_DELAY, LevelEvent::Won);
                }
            }
            Prop::WinFlag(flag) => {
                if self.rules.force_win().is_some() {
                    flag.on_player_enter(session);
                }
            }
        }
    }

    fn resolve_weapon_hits(&mut self, dt: f32, time: f64) {
        let Some((center, half)) = self.player.weapon_hitbox() else {
            return;
        };
        let (min, max) = (center - half, center + half);
        let source = self.player.position();
        let view = self.player.view();

        for slot in &mut self.enemies {
            if !slot.behavior.core().is_alive() {
                continue;
            }
            let Some((lo, hi)) = self.physics.collider_bounds(slot.collider) else {
                continue;
            };
            let overlaps = lo.x <= max.x && hi.x >= min.x && lo.y <= max.y && hi.y >= min.y;
            if overlaps && self.player.register_weapon_hit(slot.id) {
                debug!("Weapon hit {} #{}", slot.behavior.kind(), slot.id);
                drive_enemy(&mut self.physics, slot, view, dt, time, |behavior, ctx| {
                    behavior.on_weapon_hit(ctx, source)
                });
            }
        }
    }

    fn update_objectives(&mut self, session: &GameSession) {
        if let Some(objectives) = &mut self.objectives {
            objectives.update(session);
        }
        let objectives = self.objectives.as_ref();
        for slot in &mut self.props {
            if let Prop::VictoryFlag(flag) = &mut slot.prop {
                flag.update_visuals(objectives);
            }
        }
    }

    fn check_rules(&mut self, session: &GameSession, dt: f32) {
        if !self.player.is_dead() && self.player.position().y < self.kill_plane {
            info!("Player fell out of the level");
            self.player.kill();
        }

        if let Some(outcome) = self.rules.update(dt, session, self.player.hp()) {
            let event = match outcome {
                RuleOutcome::Won => LevelEvent::Won,
                RuleOutcome::Lost => LevelEvent::Lost,
            };
            self.timers.schedule(RESULT_DELAY, event);
        }
    }

    fn run_timers(&mut self, session: &mut GameSession, dt: f32) {
        for event in self.timers.update(dt) {
            match event {
                LevelEvent::RemoveProp(id) => self.remove_prop(id),
                LevelEvent::Won => session.player_won(),
                LevelEvent::Lost => session.player_lost(),
            }
        }
    }

    fn remove_prop(&mut self, id: EntityId) {
        if let Some(index) = self.props.iter().position(|s| s.id == id) {
            let slot = self.props.swap_remove(index);
            self.physics.remove_rigid_body(slot.body);
            debug!("Prop #{id} removed");
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn objectives(&self) -> Option<&LevelObjectives> {
        self.objectives.as_ref()
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn enemies(&self) -> impl Iterator<Item = &dyn EnemyBehavior> {
        self.enemies.iter().map(|slot| slot.behavior.as_ref())
    }

    pub fn pickup_count(&self) -> usize {
        self.pickups.len()
    }

    pub fn props(&self) -> impl Iterator<Item = &Prop> {
        self.props.iter().map(|slot| &slot.prop)
    }

    pub fn pending_events(&self) -> usize {
        self.timers.len()
    }
}

/// Run one enemy callback against its current body state, then apply the
/// body commands it queued. Returns `None` if the enemy has no body.
fn drive_enemy<T>(
    physics: &mut PhysicsWorld,
    slot: &mut EnemySlot,
    player: PlayerView,
    dt: f32,
    time: f64,
    callback: impl FnOnce(&mut Box<dyn EnemyBehavior>, &mut EnemyContext) -> T,
) -> Option<(T, Option<Damage>)> {
    let position = physics.body_position(slot.body)?;
    let velocity = physics.body_velocity(slot.body).unwrap_or(Vec2::ZERO);

    let (result, commands, damage) = {
        let probe = WorldProbe::new(physics, Some(slot.body));
        let mut ctx = EnemyContext::new(position, velocity, dt, time, Some(player), &probe);
        let result = callback(&mut slot.behavior, &mut ctx);
        (result, ctx.commands, ctx.player_damage)
    };

    for command in commands {
        physics.apply_command(slot.body, slot.collider, command);
    }
    Some((result, damage))
}

fn hurt_player(player: &mut Player, damage: Damage) {
    if !player.get_damage(damage.source, damage.amount) {
        debug!("Player ignored {} damage while recovering", damage.amount);
    }
}
