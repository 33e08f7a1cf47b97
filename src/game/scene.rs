// Scene identifiers and the names they are loaded by

use std::fmt;

use crate::core::{GameError, GameResult};

/// Every screen the game can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    MainMenu,
    Instructions,
    /// Playable level, numbered from 1
    Level(u32),
    Win,
    Lose,
}

impl Scene {
    pub fn is_level(&self) -> bool {
        matches!(self, Self::Level(_))
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainMenu => write!(f, "main menu"),
            Self::Instructions => write!(f, "instructions"),
            Self::Level(n) => write!(f, "level {n}"),
            Self::Win => write!(f, "win screen"),
            Self::Lose => write!(f, "lose screen"),
        }
    }
}

/// A navigation request produced by the session and consumed by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Load(Scene),
    Exit,
}

/// Scene names and level numbering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    pub main_menu: String,
    pub instructions: String,
    pub win: String,
    pub lose: String,
    /// Levels are named `{level_prefix}{n}`
    pub level_prefix: String,
    pub max_levels: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            main_menu: "MainMenu".to_string(),
            instructions: "Instructions".to_string(),
            win: "Win".to_string(),
            lose: "Lose".to_string(),
            level_prefix: "Level".to_string(),
            max_levels: 4,
        }
    }
}

impl SceneConfig {
    pub fn level_name(&self, level: u32) -> String {
        format!("{}{}", self.level_prefix, level)
    }

    pub fn scene_name(&self, scene: Scene) -> String {
        match scene {
            Scene::MainMenu => self.main_menu.clone(),
            Scene::Instructions => self.instructions.clone(),
            Scene::Level(n) => self.level_name(n),
            Scene::Win => self.win.clone(),
            Scene::Lose => self.lose.clone(),
        }
    }

    /// Resolve a scene by the name it is loaded with
    pub fn resolve(&self, name: &str) -> GameResult<Scene> {
        if name.is_empty() {
            return Err(GameError::EmptySceneName);
        }

        let named = [
            (&self.main_menu, Scene::MainMenu),
            (&self.instructions, Scene::Instructions),
            (&self.win, Scene::Win),
            (&self.lose, Scene::Lose),
        ];
        if let Some((_, scene)) = named.iter().find(|(n, _)| n.as_str() == name) {
            return Ok(*scene);
        }

        let level = name
            .strip_prefix(self.level_prefix.as_str())
            .and_then(|rest| rest.parse::<u32>().ok())
            .ok_or_else(|| GameError::UnknownScene(name.to_string()))?;
        self.check_level(level)?;
        Ok(Scene::Level(level))
    }

    pub fn check_level(&self, level: u32) -> GameResult<()> {
        if level == 0 || level > self.max_levels {
            return Err(GameError::LevelOutOfRange {
                level,
                max: self.max_levels,
            });
        }
        Ok(())
    }
}
