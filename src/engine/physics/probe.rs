// Spatial queries used by game logic to sense walls, ledges and neighbours

use glam::Vec2;
use rapier2d::prelude::QueryFilter;

use super::collision::CollisionGroups;
use super::world::{PhysicsWorld, RigidBodyHandle};

/// Read-only view of the level geometry from one entity's point of view
pub trait Probe {
    /// Distance along `dir` to the first collider of `group`, if one lies within `distance`
    fn ray_distance(&self, origin: Vec2, dir: Vec2, distance: f32, group: CollisionGroups)
        -> Option<f32>;

    /// Does a ray from `origin` along `dir` hit something in `group` within `distance`?
    fn ray_hits(&self, origin: Vec2, dir: Vec2, distance: f32, group: CollisionGroups) -> bool {
        self.ray_distance(origin, dir, distance, group).is_some()
    }

    /// Does a box of `width` centred on `center`, swept down by `distance`, hit `group`?
    fn box_hits_below(&self, center: Vec2, width: f32, distance: f32, group: CollisionGroups)
        -> bool;
}

/// Probe backed by the rapier query pipeline, ignoring the querying body
pub struct WorldProbe<'a> {
    world: &'a PhysicsWorld,
    exclude: Option<RigidBodyHandle>,
}

impl<'a> WorldProbe<'a> {
    pub fn new(world: &'a PhysicsWorld, exclude: Option<RigidBodyHandle>) -> Self {
        Self { world, exclude }
    }

    fn filter(&self, group: CollisionGroups) -> QueryFilter<'static> {
        let filter = QueryFilter::default()
            .exclude_sensors()
            .groups(CollisionGroups::query_mask(&[group]));
        match self.exclude {
            Some(handle) => filter.exclude_rigid_body(handle),
            None => filter,
        }
    }
}

impl Probe for WorldProbe<'_> {
    fn ray_distance(
        &self,
        origin: Vec2,
        dir: Vec2,
        distance: f32,
        group: CollisionGroups,
    ) -> Option<f32> {
        self.world
            .raycast(origin, dir, distance, true, self.filter(group))
            .map(|(_, toi)| toi)
    }

    fn box_hits_below(
        &self,
        center: Vec2,
        width: f32,
        distance: f32,
        group: CollisionGroups,
    ) -> bool {
        self.world
            .box_cast_down(center, width, distance, self.filter(group))
            .is_some()
    }
}

/// Probe over a fixed list of axis-aligned boxes, for tests
#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Default)]
    pub struct FakeProbe {
        boxes: Vec<(CollisionGroups, Vec2, Vec2)>,
    }

    impl FakeProbe {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a box by center and full size
        pub fn with_box(mut self, group: CollisionGroups, center: Vec2, size: Vec2) -> Self {
            let half = size / 2.0;
            self.boxes.push((group, center - half, center + half));
            self
        }

        /// A wide floor whose top surface sits at `top`
        pub fn with_floor(self, top: f32) -> Self {
            self.with_box(
                CollisionGroups::Terrain,
                Vec2::new(0.0, top - 0.5),
                Vec2::new(1000.0, 1.0),
            )
        }

        fn contains(&self, point: Vec2, group: CollisionGroups) -> bool {
            self.boxes.iter().any(|(g, min, max)| {
                *g == group
                    && point.x >= min.x
                    && point.x <= max.x
                    && point.y >= min.y
                    && point.y <= max.y
            })
        }
    }

    impl Probe for FakeProbe {
        fn ray_distance(
            &self,
            origin: Vec2,
            dir: Vec2,
            distance: f32,
            group: CollisionGroups,
        ) -> Option<f32> {
            let dir = dir.normalize_or_zero();
            let steps = (distance / 0.005).ceil().max(1.0) as usize;
            (0..=steps)
                .map(|i| distance * i as f32 / steps as f32)
                .find(|t| self.contains(origin + dir * *t, group))
        }

        fn box_hits_below(
            &self,
            center: Vec2,
            width: f32,
            distance: f32,
            group: CollisionGroups,
        ) -> bool {
            let half = width / 2.0;
            [-half, 0.0, half].iter().any(|dx| {
                self.ray_hits(Vec2::new(center.x + dx, center.y), Vec2::NEG_Y, distance, group)
            })
        }
    }
}
