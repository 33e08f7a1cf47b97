// Level layouts as plain data, turned into a running `Level` on load

use glam::Vec2;

use crate::game::collectables::{CollectableItem, CollectableKind, CollectableSpawner};
use crate::game::enemies::EnemyConfig;
use crate::game::objectives::Objective;
use crate::game::rules::GameRules;

/// Height below which the player counts as fallen out of the level
pub const DEFAULT_KILL_PLANE: f32 = -10.0;

/// Axis-aligned solid block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub center: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone)]
pub struct EnemyPlacement {
    pub position: Vec2,
    pub config: EnemyConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropPlacement {
    LockedBlock { position: Vec2, keys_required: u32 },
    VictoryFlag { position: Vec2, require_objectives: bool },
    WinFlag { position: Vec2 },
}

impl PropPlacement {
    pub fn position(&self) -> Vec2 {
        match *self {
            Self::LockedBlock { position, .. }
            | Self::VictoryFlag { position, .. }
            | Self::WinFlag { position } => position,
        }
    }
}

/// Everything needed to build one level
#[derive(Debug, Clone)]
pub struct LevelBlueprint {
    pub name: String,
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<EnemyPlacement>,
    pub collectables: Vec<CollectableItem>,
    pub spawners: Vec<CollectableSpawner>,
    pub props: Vec<PropPlacement>,
    /// `None` when the level has no objective list at all
    pub objectives: Option<Vec<Objective>>,
    pub rules: GameRules,
    pub kill_plane: f32,
}

impl LevelBlueprint {
    pub fn new(name: impl Into<String>, spawn: Vec2) -> Self {
        Self {
            name: name.into(),
            spawn,
            platforms: Vec::new(),
            enemies: Vec::new(),
            collectables: Vec::new(),
            spawners: Vec::new(),
            props: Vec::new(),
            objectives: None,
            rules: GameRules::survival_only(),
            kill_plane: DEFAULT_KILL_PLANE,
        }
    }

    /// Solid block given by its center and full size
    pub fn platform(mut self, center: Vec2, size: Vec2) -> Self {
        self.platforms.push(Platform { center, size });
        self
    }

    /// Flat ground whose top surface sits at `top`, spanning `from_x..to_x`
    pub fn ground(self, from_x: f32, to_x: f32, top: f32) -> Self {
        let width = to_x - from_x;
        self.platform(
            Vec2::new(from_x + width / 2.0, top - 0.5),
            Vec2::new(width, 1.0),
        )
    }

    pub fn enemy(mut self, position: Vec2, config: EnemyConfig) -> Self {
        self.enemies.push(EnemyPlacement { position, config });
        self
    }

    pub fn item(mut self, kind: CollectableKind, position: Vec2) -> Self {
        self.collectables.push(CollectableItem::new(kind, position));
        self
    }

    /// A row of `count` items, one unit apart, starting at `start`
    pub fn item_row(mut self, kind: CollectableKind, start: Vec2, count: usize) -> Self {
        for i in 0..count {
            self.collectables
                .push(CollectableItem::new(kind, start + Vec2::new(i as f32, 0.0)));
        }
        self
    }

    pub fn spawner(mut self, spawner: CollectableSpawner) -> Self {
        self.spawners.push(spawner);
        self
    }

    pub fn locked_block(mut self, position: Vec2, keys_required: u32) -> Self {
        self.props.push(PropPlacement::LockedBlock {
            position,
            keys_required,
        });
        self
    }

    pub fn victory_flag(mut self, position: Vec2, require_objectives: bool) -> Self {
        self.props.push(PropPlacement::VictoryFlag {
            position,
            require_objectives,
        });
        self
    }

    pub fn win_flag(mut self, position: Vec2) -> Self {
        self.props.push(PropPlacement::WinFlag { position });
        self
    }

    pub fn objectives(mut self, objectives: Vec<Objective>) -> Self {
        self.objectives = Some(objectives);
        self
    }

    pub fn rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn kill_plane(mut self, y: f32) -> Self {
        self.kill_plane = y;
        self
    }

    /// Number of entities this layout puts into the physics world
    pub fn entity_count(&self) -> usize {
        self.platforms.len() + self.enemies.len() + self.collectables.len() + self.props.len()
    }
}
