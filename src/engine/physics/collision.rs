use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
///
/// Terrain covers both ground and walls: every level query that looks for
/// "something solid" tests against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The player character
    Player = 0b0000_0010,

    /// Walking, hopping and flying enemies
    Enemy = 0b0000_0100,

    /// Ground, walls, platforms and locked blocks
    Terrain = 0b0000_1000,

    /// Saws, lava, falling blocks
    Hazard = 0b0001_0000,

    /// Coins, gems, keys and hearts
    Pickup = 0b0010_0000,

    /// Flags and other player-only trigger zones
    Trigger = 0b0100_0000,

    /// Ghosts pass through terrain and only notice the player
    Ghost = 0b1000_0000,
}

impl CollisionGroups {
    /// Raw membership bits for this group
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Group mask containing only this group
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = self.group();

        let filter = match self {
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Terrain as u32
                    | CollisionGroups::Enemy as u32
                    | CollisionGroups::Hazard as u32
                    | CollisionGroups::Pickup as u32
                    | CollisionGroups::Trigger as u32
                    | CollisionGroups::Ghost as u32
                    | CollisionGroups::Default as u32,
            ),

            // Enemies bump into each other so patrols turn around
            CollisionGroups::Enemy => Group::from_bits_truncate(
                CollisionGroups::Terrain as u32
                    | CollisionGroups::Player as u32
                    | CollisionGroups::Enemy as u32
                    | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Terrain => Group::from_bits_truncate(
                CollisionGroups::Player as u32
                    | CollisionGroups::Enemy as u32
                    | CollisionGroups::Terrain as u32
                    | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Hazard
            | CollisionGroups::Pickup
            | CollisionGroups::Trigger
            | CollisionGroups::Ghost => Group::from_bits_truncate(CollisionGroups::Player as u32),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Query groups that only report colliders of the given kinds
    pub fn query_mask(groups: &[CollisionGroups]) -> InteractionGroups {
        let mask = groups.iter().fold(0u32, |acc, g| acc | g.bits());
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(mask))
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CollisionGroups; 8] = [
        CollisionGroups::Default,
        CollisionGroups::Player,
        CollisionGroups::Enemy,
        CollisionGroups::Terrain,
        CollisionGroups::Hazard,
        CollisionGroups::Pickup,
        CollisionGroups::Trigger,
        CollisionGroups::Ghost,
    ];

    #[test]
    fn test_collision_groups_bits() {
        for (i, group1) in ALL.iter().enumerate() {
            for (j, group2) in ALL.iter().enumerate() {
                if i != j {
                    assert_ne!(group1.bits(), group2.bits(), "Groups must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_ghost_ignores_terrain() {
        let ghost = CollisionGroups::Ghost.to_interaction_groups();
        assert!(!ghost.filter.contains(CollisionGroups::Terrain.group()));
        assert!(ghost.filter.contains(CollisionGroups::Player.group()));
    }

    #[test]
    fn test_pickups_only_touch_player() {
        let pickup = CollisionGroups::Pickup.to_interaction_groups();
        assert!(pickup.filter.contains(CollisionGroups::Player.group()));
        assert!(!pickup.filter.contains(CollisionGroups::Enemy.group()));
    }

    #[test]
    fn test_enemies_collide_with_enemies() {
        let enemy = CollisionGroups::Enemy.to_interaction_groups();
        assert!(enemy.filter.contains(CollisionGroups::Enemy.group()));
        assert!(enemy.filter.contains(CollisionGroups::Terrain.group()));
    }

    #[test]
    fn test_query_mask() {
        let mask = CollisionGroups::query_mask(&[CollisionGroups::Terrain, CollisionGroups::Enemy]);
        assert!(mask.filter.contains(CollisionGroups::Terrain.group()));
        assert!(mask.filter.contains(CollisionGroups::Enemy.group()));
        assert!(!mask.filter.contains(CollisionGroups::Player.group()));
    }
}
