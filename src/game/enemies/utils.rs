// Sensing helpers shared by the enemy controllers

use glam::Vec2;

use crate::engine::physics::{CollisionGroups, Probe};

/// How far ahead of the body the ledge ray is cast
pub const EDGE_LOOKAHEAD: f32 = 0.5;

/// Dot product above which the player counts as looking at something
pub const LOOK_THRESHOLD: f32 = 0.3;

/// Terrain directly ahead within `distance`
pub fn detect_wall(probe: &dyn Probe, position: Vec2, direction: f32, distance: f32) -> bool {
    probe.ray_hits(
        position,
        Vec2::new(direction, 0.0),
        distance,
        CollisionGroups::Terrain,
    )
}

/// No ground below a point just ahead of the body
pub fn detect_edge(probe: &dyn Probe, position: Vec2, direction: f32, distance: f32) -> bool {
    let origin = position + Vec2::new(direction * EDGE_LOOKAHEAD, 0.0);
    !probe.ray_hits(origin, Vec2::NEG_Y, distance, CollisionGroups::Terrain)
}

/// Another enemy directly ahead (the probe already ignores our own body)
pub fn detect_enemy(probe: &dyn Probe, position: Vec2, direction: f32, distance: f32) -> bool {
    probe.ray_hits(
        position,
        Vec2::new(direction, 0.0),
        distance,
        CollisionGroups::Enemy,
    )
}

pub fn is_player_in_range(position: Vec2, player: Vec2, range: f32) -> bool {
    position.distance(player) <= range
}

pub fn is_player_in_front(position: Vec2, facing: f32, player: Vec2) -> bool {
    let dx = player.x - position.x;
    (facing > 0.0 && dx > 0.0) || (facing < 0.0 && dx < 0.0)
}

pub fn is_player_behind(position: Vec2, facing: f32, player: Vec2) -> bool {
    let dx = player.x - position.x;
    (facing > 0.0 && dx < 0.0) || (facing < 0.0 && dx > 0.0)
}

/// Is the player facing `target`?
pub fn is_player_looking_at(player: Vec2, player_facing: f32, target: Vec2) -> bool {
    let to_target = (target - player).normalize_or_zero();
    Vec2::new(player_facing, 0.0).dot(to_target) > LOOK_THRESHOLD
}

pub fn flip(facing: f32) -> f32 {
    -facing
}

/// Unit vector from `position` to the player
pub fn direction_to_player(position: Vec2, player: Vec2) -> Vec2 {
    (player - position).normalize_or_zero()
}

/// Facing that points at `target` along x (unchanged when level with it)
pub fn face_towards(position: Vec2, facing: f32, target: Vec2) -> f32 {
    let dx = target.x - position.x;
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else {
        facing
    }
}

/// Point on the body's leading side, where horizontal rays start
pub fn front(position: Vec2, facing: f32, half_width: f32) -> Vec2 {
    position + Vec2::new(facing * half_width, 0.0)
}

/// Common patrol turn check: wall, then ledge, then another enemy
pub fn should_turn(
    probe: &dyn Probe,
    position: Vec2,
    half_width: f32,
    facing: f32,
    wall_distance: f32,
    edge_distance: f32,
    stop_at_edge: bool,
) -> bool {
    let ahead = front(position, facing, half_width);
    detect_wall(probe, ahead, facing, wall_distance)
        || (stop_at_edge && detect_edge(probe, position, facing, edge_distance))
        || detect_enemy(probe, ahead, facing, wall_distance)
}
