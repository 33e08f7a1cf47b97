// In-level heads-up display: score, keys, hit points and objectives

use std::fmt;

use super::objectives_display::ObjectivesDisplay;
use crate::core::math::clamp01;
use crate::game::level::Level;
use crate::game::session::GameSession;

/// Characters used for the text health bar
const BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    pub hp: u32,
    pub max_hp: u32,
}

impl HealthBar {
    pub fn new(hp: u32, max_hp: u32) -> Self {
        Self { hp, max_hp }
    }

    /// Filled share of the bar in 0..=1
    pub fn fill(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        clamp01(self.hp as f32 / self.max_hp as f32)
    }

    /// "hp/max"
    pub fn label(&self) -> String {
        format!("{}/{}", self.hp, self.max_hp)
    }
}

impl fmt::Display for HealthBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = (self.fill() * BAR_WIDTH as f32).round() as usize;
        write!(
            f,
            "[{}{}] {}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.label()
        )
    }
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub keys_text: String,
    pub hp_text: String,
    pub health: HealthBar,
    pub objectives: ObjectivesDisplay,
}

impl Hud {
    pub fn new(session: &GameSession, level: &Level) -> Self {
        let player = level.player();
        Self {
            score_text: format!("Score: {}", session.score()),
            keys_text: format!("Keys: {}", session.key_count()),
            hp_text: format!("HP: {}", player.hp()),
            health: HealthBar::new(player.hp(), player.max_hp()),
            objectives: ObjectivesDisplay::build(level.objectives()),
        }
    }

    /// Single-line rendering used as the window title
    pub fn status_line(&self) -> String {
        format!(
            "{} | {} | {} {} | {}",
            self.score_text,
            self.keys_text,
            self.hp_text,
            self.health,
            self.objectives.inline()
        )
    }
}
