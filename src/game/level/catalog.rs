// Built-in level layouts
//
// Ground tops sit at y = 0 unless noted; enemies are placed by their center.

use glam::Vec2;

use super::blueprint::LevelBlueprint;
use crate::core::{GameError, GameResult};
use crate::game::collectables::{CollectableKind, CollectableSpawner};
use crate::game::enemies::{
    BarnacleConfig, BatConfig, EnemyConfig, FrogConfig, GhostConfig, LavaConfig, MouseConfig,
    SawConfig, SawPath, SlimeConfig, SnakeConfig, SpiderConfig, ThwompConfig,
};
use crate::game::objectives::Objective;
use crate::game::rules::GameRules;

pub const LEVEL_COUNT: u32 = 4;

/// Blueprint of level `level` (numbered from 1)
pub fn blueprint(level: u32) -> GameResult<LevelBlueprint> {
    match level {
        1 => Ok(meadow()),
        2 => Ok(caverns()),
        3 => Ok(foundry()),
        4 => Ok(gauntlet()),
        _ => Err(GameError::LevelOutOfRange {
            level,
            max: LEVEL_COUNT,
        }),
    }
}

/// Gentle introduction: walkers, coins and the basic objective set
fn meadow() -> LevelBlueprint {
    use CollectableKind::*;

    LevelBlueprint::new("Meadow", Vec2::new(0.0, 1.0))
        .ground(-6.0, 14.0, 0.0)
        .ground(16.0, 34.0, 0.0)
        .platform(Vec2::new(8.0, 2.25), Vec2::new(4.0, 0.5))
        .platform(Vec2::new(22.0, 2.75), Vec2::new(3.0, 0.5))
        // Boundary walls
        .platform(Vec2::new(-6.5, 3.0), Vec2::new(1.0, 6.0))
        .platform(Vec2::new(34.5, 3.0), Vec2::new(1.0, 6.0))
        .item_row(Coin, Vec2::new(2.0, 0.7), 3)
        .item_row(Coin, Vec2::new(7.0, 3.0), 3)
        .item(GemRed, Vec2::new(12.0, 0.7))
        .item(GemRed, Vec2::new(22.0, 3.5))
        .item(GemRed, Vec2::new(28.0, 0.7))
        .item(Heart, Vec2::new(18.0, 0.7))
        .enemy(
            Vec2::new(5.0, 0.25),
            EnemyConfig::Slime(SlimeConfig::default()),
        )
        .enemy(
            Vec2::new(12.0, 0.25),
            EnemyConfig::Snake(SnakeConfig::default()),
        )
        .enemy(
            Vec2::new(25.0, 0.25),
            EnemyConfig::Slime(SlimeConfig {
                start_left: true,
                ..SlimeConfig::default()
            }),
        )
        .objectives(vec![
            Objective::score(100),
            Objective::collect(Coin, 5),
            Objective::collect(GemRed, 3),
        ])
        .victory_flag(Vec2::new(32.0, 1.0), true)
}

/// Underground: keys, a locked gate, bats and hopping enemies
fn caverns() -> LevelBlueprint {
    use CollectableKind::*;

    LevelBlueprint::new("Caverns", Vec2::new(0.0, 1.0))
        .ground(-4.0, 40.0, 0.0)
        // Ceiling the bats hang from
        .platform(Vec2::new(18.0, 8.5), Vec2::new(44.0, 1.0))
        .platform(Vec2::new(-4.5, 4.0), Vec2::new(1.0, 8.0))
        .platform(Vec2::new(40.5, 4.0), Vec2::new(1.0, 8.0))
        .platform(Vec2::new(10.0, 2.25), Vec2::new(3.0, 0.5))
        .item(Key, Vec2::new(10.0, 3.0))
        .item_row(Coin, Vec2::new(3.0, 0.7), 4)
        .item(GemBlue, Vec2::new(16.0, 0.7))
        .item(GemBlue, Vec2::new(27.0, 0.7))
        .spawner(CollectableSpawner {
            spawn_radius: 2.0,
            keys: 0,
            ..CollectableSpawner::at(Vec2::new(33.0, 2.6))
        })
        .enemy(
            Vec2::new(7.0, 0.4),
            EnemyConfig::Frog(FrogConfig::default()),
        )
        .enemy(
            Vec2::new(14.0, 7.7),
            EnemyConfig::Bat(BatConfig::default()),
        )
        .enemy(
            Vec2::new(20.0, 0.3),
            EnemyConfig::Mouse(MouseConfig::default()),
        )
        .enemy(
            Vec2::new(26.0, 0.3),
            EnemyConfig::Spider(SpiderConfig::default()),
        )
        .enemy(
            Vec2::new(30.0, 7.7),
            EnemyConfig::Bat(BatConfig::default()),
        )
        // Gate across the tunnel, sealed up to the ceiling
        .locked_block(Vec2::new(36.0, 0.5), 1)
        .platform(Vec2::new(36.0, 4.5), Vec2::new(1.0, 7.0))
        .objectives(vec![
            Objective::score(150),
            Objective::collect(GemBlue, 2),
        ])
        .victory_flag(Vec2::new(38.5, 1.0), true)
}

/// Machinery: saws, falling blocks, lava and a haunted corridor
fn foundry() -> LevelBlueprint {
    use CollectableKind::*;

    LevelBlueprint::new("Foundry", Vec2::new(0.0, 1.0))
        .ground(-4.0, 10.0, 0.0)
        .ground(14.0, 44.0, 0.0)
        // Pit floor holding the lava
        .ground(10.0, 14.0, -2.0)
        .platform(Vec2::new(12.0, 1.25), Vec2::new(1.5, 0.5))
        .platform(Vec2::new(22.0, 6.5), Vec2::new(6.0, 1.0))
        .platform(Vec2::new(-4.5, 3.0), Vec2::new(1.0, 6.0))
        .platform(Vec2::new(44.5, 3.0), Vec2::new(1.0, 6.0))
        .item_row(Coin, Vec2::new(2.0, 0.7), 3)
        .item(GemYellow, Vec2::new(12.0, 2.0))
        .item(Heart, Vec2::new(30.0, 0.7))
        .item_row(Gem, Vec2::new(35.0, 0.7), 2)
        .enemy(
            Vec2::new(6.0, 2.0),
            EnemyConfig::Saw(SawConfig {
                range: 1.5,
                ..SawConfig::with_path(SawPath::Vertical)
            }),
        )
        .enemy(
            Vec2::new(12.0, -1.75),
            EnemyConfig::Lava(LavaConfig {
                width: 4.0,
                rise_height: 2.5,
                ..LavaConfig::default()
            }),
        )
        .enemy(
            Vec2::new(18.0, 0.0),
            EnemyConfig::Saw(SawConfig::with_path(SawPath::FloorHorizontal)),
        )
        .enemy(
            Vec2::new(22.0, 5.6),
            EnemyConfig::Thwomp(ThwompConfig {
                detection_range: 5.0,
                ..ThwompConfig::default()
            }),
        )
        .enemy(
            Vec2::new(26.0, 0.3),
            EnemyConfig::Barnacle(BarnacleConfig::default()),
        )
        .enemy(
            Vec2::new(31.0, 3.0),
            EnemyConfig::Ghost(GhostConfig::default()),
        )
        .enemy(
            Vec2::new(38.0, 3.0),
            EnemyConfig::Saw(SawConfig {
                range: 1.5,
                clockwise: false,
                ..SawConfig::default()
            }),
        )
        .victory_flag(Vec2::new(42.0, 1.0), false)
}

/// Last stand: reach the score goal or the win flag
fn gauntlet() -> LevelBlueprint {
    use CollectableKind::*;

    LevelBlueprint::new("Gauntlet", Vec2::new(0.0, 1.0))
        .ground(-4.0, 50.0, 0.0)
        .platform(Vec2::new(-4.5, 4.0), Vec2::new(1.0, 8.0))
        .platform(Vec2::new(50.5, 4.0), Vec2::new(1.0, 8.0))
        .platform(Vec2::new(15.0, 3.0), Vec2::new(4.0, 2.0))
        .platform(Vec2::new(32.0, 2.25), Vec2::new(6.0, 0.5))
        .item_row(Coin, Vec2::new(3.0, 0.7), 5)
        .item_row(GemGreen, Vec2::new(31.0, 3.0), 3)
        .item(Heart, Vec2::new(24.0, 0.7))
        .spawner(CollectableSpawner {
            spawn_radius: 2.0,
            ..CollectableSpawner::at(Vec2::new(40.0, 2.6))
        })
        .enemy(
            Vec2::new(10.0, 0.25),
            EnemyConfig::Slime(SlimeConfig::default()),
        )
        .enemy(
            Vec2::new(15.0, 3.0),
            EnemyConfig::Saw(SawConfig::with_path(SawPath::Square {
                center: None,
                width: 4.0,
                height: 2.0,
                rotate: true,
            })),
        )
        .enemy(
            Vec2::new(20.0, 0.4),
            EnemyConfig::Frog(FrogConfig {
                start_left: true,
                ..FrogConfig::default()
            }),
        )
        .enemy(
            Vec2::new(28.0, 0.3),
            EnemyConfig::Mouse(MouseConfig::default()),
        )
        .enemy(
            Vec2::new(32.0, 1.75),
            EnemyConfig::Saw(SawConfig {
                speed: 1.5,
                ..SawConfig::with_path(SawPath::Orbit {
                    center: None,
                    radius: 1.0,
                })
            }),
        )
        .enemy(
            Vec2::new(36.0, 0.25),
            EnemyConfig::Snake(SnakeConfig::default()),
        )
        .enemy(
            Vec2::new(44.0, 4.0),
            EnemyConfig::Ghost(GhostConfig::default()),
        )
        .rules(GameRules::survival_only().with_score_goal(150))
        .win_flag(Vec2::new(48.0, 1.0))
}
