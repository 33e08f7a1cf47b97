use glam::Vec2;
use log::debug;
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};
use super::command::{BodyCommand, BodyMode};
use crate::core::EntityId;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Default platformer gravity (m/s² in y-axis)
pub const DEFAULT_GRAVITY: Real = -20.0;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// Mapping from bodies to game entity IDs
    body_to_entity: HashMap<RigidBodyHandle, EntityId>,
}

impl PhysicsWorld {
    /// Create a new physics world with platformer gravity
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, DEFAULT_GRAVITY])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            body_to_entity: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Insert a body with a single collider and tag it with an entity ID
    pub fn spawn(
        &mut self,
        entity: EntityId,
        body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = self.add_rigid_body(body);
        let collider_handle = self.add_collider(collider, body_handle);
        self.set_entity_mapping(body_handle, entity);
        (body_handle, collider_handle)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
        if let Some(entity) = self.body_to_entity.remove(&handle) {
            debug!("Removed body of entity {}", entity);
        }
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Associate a game entity ID with a rigid body
    pub fn set_entity_mapping(&mut self, body_handle: RigidBodyHandle, entity_id: EntityId) {
        self.body_to_entity.insert(body_handle, entity_id);
    }

    /// Get the entity ID associated with a rigid body
    pub fn get_entity_id(&self, body_handle: RigidBodyHandle) -> Option<EntityId> {
        self.body_to_entity.get(&body_handle).copied()
    }

    /// Get the entity owning a collider, through its parent body
    pub fn entity_for_collider(&self, handle: ColliderHandle) -> Option<EntityId> {
        let parent = self.collider_set.get(handle)?.parent()?;
        self.get_entity_id(parent)
    }

    /// Position of a body as a glam vector
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle).map(|body| {
            let t = body.translation();
            Vec2::new(t.x, t.y)
        })
    }

    /// Linear velocity of a body as a glam vector
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle).map(|body| {
            let v = body.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    /// World-space bounding box of a collider as (mins, maxs)
    pub fn collider_bounds(&self, handle: ColliderHandle) -> Option<(Vec2, Vec2)> {
        self.collider_set.get(handle).map(|collider| {
            let aabb = collider.compute_aabb();
            (
                Vec2::new(aabb.mins.x, aabb.mins.y),
                Vec2::new(aabb.maxs.x, aabb.maxs.y),
            )
        })
    }

    /// Apply a deferred command to a body and its collider
    pub fn apply_command(
        &mut self,
        body_handle: RigidBodyHandle,
        collider_handle: ColliderHandle,
        command: BodyCommand,
    ) {
        match command {
            BodyCommand::SetColliderEnabled(enabled) => {
                if let Some(collider) = self.collider_set.get_mut(collider_handle) {
                    collider.set_enabled(enabled);
                }
                return;
            }
            BodyCommand::ResizeBox(half_extents) => {
                if let Some(collider) = self.collider_set.get_mut(collider_handle) {
                    collider.set_shape(SharedShape::cuboid(half_extents.x, half_extents.y));
                }
                return;
            }
            _ => {}
        }

        let Some(body) = self.rigid_body_set.get_mut(body_handle) else {
            return;
        };
        let kinematic = body.is_kinematic();

        match command {
            BodyCommand::Translate(delta) => {
                let t = *body.translation();
                let next = vector![t.x + delta.x, t.y + delta.y];
                if kinematic {
                    body.set_next_kinematic_translation(next);
                } else {
                    body.set_translation(next, true);
                }
            }
            BodyCommand::SetPosition(position) => {
                let next = vector![position.x, position.y];
                if kinematic {
                    body.set_next_kinematic_translation(next);
                } else {
                    body.set_translation(next, true);
                }
            }
            BodyCommand::SetVelocity(v) => body.set_linvel(vector![v.x, v.y], true),
            BodyCommand::SetVelocityX(x) => {
                let y = body.linvel().y;
                body.set_linvel(vector![x, y], true);
            }
            BodyCommand::SetVelocityY(y) => {
                let x = body.linvel().x;
                body.set_linvel(vector![x, y], true);
            }
            BodyCommand::Impulse(impulse) => {
                body.apply_impulse(vector![impulse.x, impulse.y], true);
            }
            BodyCommand::SetMode(mode) => {
                let body_type = match mode {
                    BodyMode::Dynamic => RigidBodyType::Dynamic,
                    BodyMode::Kinematic => RigidBodyType::KinematicPositionBased,
                    BodyMode::Fixed => RigidBodyType::Fixed,
                };
                body.set_body_type(body_type, true);
            }
            BodyCommand::SetRotation(degrees) => {
                let rotation = Rotation::new(degrees.to_radians());
                if kinematic {
                    body.set_next_kinematic_rotation(rotation);
                } else {
                    body.set_rotation(rotation, true);
                }
            }
            BodyCommand::SetColliderEnabled(_) | BodyCommand::ResizeBox(_) => {}
        }
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vec2,
        ray_dir: Vec2,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], vector![ray_dir.x, ray_dir.y]);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Sweep a thin box straight down, approximated by rays at both edges and the center
    pub fn box_cast_down(
        &self,
        center: Vec2,
        width: Real,
        max_toi: Real,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let half = width / 2.0;
        [-half, 0.0, half]
            .iter()
            .filter_map(|dx| {
                self.raycast(
                    Vec2::new(center.x + dx, center.y),
                    Vec2::NEG_Y,
                    max_toi,
                    true,
                    filter,
                )
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Get all collision events from this frame
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Number of bodies currently simulated
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
