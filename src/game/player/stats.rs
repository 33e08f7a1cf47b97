// Player tuning values

/// Player controller settings
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Movement
    /// Horizontal speed at full axis (units/second)
    pub speed: f32,
    /// Upward impulse of a jump
    pub jump_force: f32,

    // Damage
    pub max_hp: u32,
    /// Impulse applied away from a damage source
    pub knockback_force: f32,
    /// Length of the hurt clip; damage is ignored until it ends
    pub hurt_duration: f32,

    // Ground check, relative to the collider center
    pub ray_length: f32,
    pub ray_width: f32,
    pub offset_x: f32,
    pub offset_y: f32,

    // Weapon swing
    /// Distance from the player center to the hitbox center
    pub weapon_reach: f32,
    pub weapon_width: f32,
    pub weapon_height: f32,
    pub weapon_duration: f32,

    // Dimensions (for the physics collider)
    pub width: f32,
    pub height: f32,
}

pub const BASE_STATS: PlayerStats = PlayerStats {
    speed: 5.0,
    jump_force: 10.0,

    max_hp: 3,
    knockback_force: 10.0,
    hurt_duration: 0.5,

    ray_length: 0.1,
    ray_width: 0.1,
    offset_x: 0.0,
    // Feet of a 1.0 tall collider
    offset_y: -0.5,

    weapon_reach: 0.6,
    weapon_width: 0.6,
    weapon_height: 0.6,
    weapon_duration: 0.2,

    width: 0.6,
    height: 1.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    pub fn standard() -> Self {
        BASE_STATS
    }
}
