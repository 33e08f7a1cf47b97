// Game session: score, inventory and scene navigation that survive level loads

use std::collections::HashMap;

use log::{info, warn};

use super::collectables::CollectableKind;
use super::scene::{Scene, SceneConfig, Transition};
use crate::core::GameResult;

/// Progress of one play-through, owned by the game for its whole lifetime
#[derive(Debug)]
pub struct GameSession {
    config: SceneConfig,
    score: u32,
    keys: u32,
    collected: HashMap<CollectableKind, u32>,
    current_level: u32,
    current_scene: Scene,
    pending: Option<Transition>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            score: 0,
            keys: 0,
            collected: HashMap::new(),
            current_level: 1,
            current_scene: Scene::MainMenu,
            pending: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // === Stats ===

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn add_key(&mut self) {
        self.keys += 1;
    }

    /// Count a pickup. Keys go to the key ring, hearts are not counted.
    pub fn add_collectable(&mut self, kind: CollectableKind, amount: u32) {
        match kind {
            CollectableKind::Key => self.keys += amount,
            CollectableKind::Heart => {}
            kind => *self.collected.entry(kind).or_insert(0) += amount,
        }
        info!("Collectable added: {} x{}", kind, amount);
    }

    /// Spend one key. Returns false when there is none.
    pub fn use_key(&mut self) -> bool {
        if self.keys == 0 {
            return false;
        }
        self.keys -= 1;
        true
    }

    pub fn key_count(&self) -> u32 {
        self.keys
    }

    pub fn collectable_count(&self, kind: CollectableKind) -> u32 {
        match kind {
            CollectableKind::Key => self.keys,
            kind => self.collected.get(&kind).copied().unwrap_or(0),
        }
    }

    pub fn reset_stats(&mut self) {
        self.score = 0;
        self.keys = 0;
        self.collected.clear();
        info!("Game stats reset");
    }

    // === Navigation ===

    pub fn start_game(&mut self) {
        self.current_level = 1;
        self.request_level(1);
        info!("Starting game at level 1");
    }

    pub fn show_instructions(&mut self) {
        let name = self.config.instructions.clone();
        if let Err(e) = self.load_scene(&name) {
            warn!("Instructions scene unavailable: {e}");
        }
    }

    pub fn exit_game(&mut self) {
        info!("Exit requested");
        self.pending = Some(Transition::Exit);
    }

    pub fn restart_level(&mut self) {
        info!("Restarting level {}", self.current_level);
        self.request_level(self.current_level);
    }

    /// Advance to the next level, or back to the menu after the last one
    pub fn next_level(&mut self) {
        if self.has_next_level() {
            self.current_level += 1;
            info!("Advancing to level {}", self.current_level);
            self.request_level(self.current_level);
        } else {
            info!("All levels completed, returning to the main menu");
            self.back_to_menu();
        }
    }

    pub fn back_to_menu(&mut self) {
        self.reset_stats();
        self.pending = Some(Transition::Load(Scene::MainMenu));
    }

    pub fn back_to_first_level(&mut self) {
        self.current_level = 1;
        self.request_level(1);
        self.reset_stats();
    }

    pub fn player_won(&mut self) {
        info!("Level {} completed!", self.current_level);
        self.pending = Some(Transition::Load(Scene::Win));
    }

    pub fn player_lost(&mut self) {
        info!("Player defeated");
        self.pending = Some(Transition::Load(Scene::Lose));
    }

    /// Queue a level by number and make it the current one
    pub fn load_level(&mut self, level: u32) -> GameResult<()> {
        self.config.check_level(level)?;
        self.current_level = level;
        info!("Loading level: {}", self.config.level_name(level));
        self.pending = Some(Transition::Load(Scene::Level(level)));
        Ok(())
    }

    /// Queue a scene by its configured name
    pub fn load_scene(&mut self, name: &str) -> GameResult<()> {
        let scene = self.config.resolve(name).inspect_err(|e| {
            warn!("Cannot load scene '{name}': {e}");
        })?;
        if let Scene::Level(level) = scene {
            self.current_level = level;
        }
        info!("Loading scene: {name}");
        self.pending = Some(Transition::Load(scene));
        Ok(())
    }

    fn request_level(&mut self, level: u32) {
        if let Err(e) = self.load_level(level) {
            warn!("{e}");
        }
    }

    pub fn has_next_level(&self) -> bool {
        self.current_level < self.config.max_levels
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn set_current_level(&mut self, level: u32) {
        self.current_level = level;
    }

    pub fn max_levels(&self) -> u32 {
        self.config.max_levels
    }

    pub fn current_scene(&self) -> Scene {
        self.current_scene
    }

    /// Record that a scene finished loading
    pub fn scene_loaded(&mut self, scene: Scene) {
        info!("Scene loaded: {}", self.config.scene_name(scene));
        self.current_scene = scene;
    }

    /// Take the navigation request queued since the last call
    pub fn take_transition(&mut self) -> Option<Transition> {
        self.pending.take()
    }

    pub fn pending_transition(&self) -> Option<Transition> {
        self.pending
    }

    /// Dump the session state to the log
    pub fn verify_state(&self) {
        info!("=== SESSION STATE ===");
        info!("Current level: {}", self.current_level);
        info!("Max levels: {}", self.config.max_levels);
        info!("Current scene: {}", self.config.scene_name(self.current_scene));
        info!("Score: {} / Keys: {}", self.score, self.keys);
        info!("=====================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameError;

    #[test]
    fn test_score_and_keys() {
        let mut session = GameSession::new();
        session.add_score(30);
        session.add_key();
        session.add_key();
        assert_eq!(session.score(), 30);
        assert_eq!(session.key_count(), 2);
        assert!(session.use_key());
        assert!(session.use_key());
        assert!(!session.use_key());
        assert_eq!(session.key_count(), 0);
    }

    #[test]
    fn test_collectable_counts() {
        let mut session = GameSession::new();
        session.add_collectable(CollectableKind::GemRed, 2);
        session.add_collectable(CollectableKind::Coin, 1);
        session.add_collectable(CollectableKind::Key, 1);
        session.add_collectable(CollectableKind::Heart, 1);

        assert_eq!(session.collectable_count(CollectableKind::GemRed), 2);
        assert_eq!(session.collectable_count(CollectableKind::Coin), 1);
        assert_eq!(session.collectable_count(CollectableKind::Key), 1);
        assert_eq!(session.collectable_count(CollectableKind::Heart), 0);
        assert_eq!(session.collectable_count(CollectableKind::GemBlue), 0);
    }

    #[test]
    fn test_start_game_loads_first_level() {
        let mut session = GameSession::new();
        session.set_current_level(3);
        session.start_game();
        assert_eq!(session.current_level(), 1);
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::Level(1)))
        );
        assert_eq!(session.take_transition(), None);
    }

    #[test]
    fn test_next_level_and_wrap_to_menu() {
        let mut session = GameSession::new();
        session.add_score(50);
        session.set_current_level(3);

        session.next_level();
        assert_eq!(session.current_level(), 4);
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::Level(4)))
        );
        assert!(!session.has_next_level());

        session.next_level();
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::MainMenu))
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_back_to_first_level_resets_stats() {
        let mut session = GameSession::new();
        session.set_current_level(2);
        session.add_score(100);
        session.add_key();
        session.back_to_first_level();
        assert_eq!(session.current_level(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.key_count(), 0);
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::Level(1)))
        );
    }

    #[test]
    fn test_restart_keeps_stats() {
        let mut session = GameSession::new();
        session.set_current_level(2);
        session.add_score(40);
        session.restart_level();
        assert_eq!(session.score(), 40);
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::Level(2)))
        );
    }

    #[test]
    fn test_win_lose_and_exit() {
        let mut session = GameSession::new();
        session.player_won();
        assert_eq!(session.take_transition(), Some(Transition::Load(Scene::Win)));
        session.player_lost();
        assert_eq!(session.take_transition(), Some(Transition::Load(Scene::Lose)));
        session.exit_game();
        assert_eq!(session.take_transition(), Some(Transition::Exit));
    }

    #[test]
    fn test_load_scene_by_name() {
        let mut session = GameSession::new();
        assert!(session.load_scene("Level3").is_ok());
        assert_eq!(session.current_level(), 3);
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::Level(3)))
        );

        assert_eq!(session.load_scene(""), Err(GameError::EmptySceneName));
        assert!(session.load_scene("Nowhere").is_err());
        assert_eq!(session.take_transition(), None);
    }

    #[test]
    fn test_load_level_out_of_range() {
        let mut session = GameSession::new();
        assert_eq!(
            session.load_level(9),
            Err(GameError::LevelOutOfRange { level: 9, max: 4 })
        );
        assert_eq!(session.current_level(), 1);
        assert_eq!(session.pending_transition(), None);
    }

    #[test]
    fn test_show_instructions() {
        let mut session = GameSession::new();
        session.show_instructions();
        assert_eq!(
            session.take_transition(),
            Some(Transition::Load(Scene::Instructions))
        );
    }

    #[test]
    fn test_scene_loaded_updates_current_scene() {
        let mut session = GameSession::new();
        assert_eq!(session.current_scene(), Scene::MainMenu);
        session.scene_loaded(Scene::Level(2));
        assert_eq!(session.current_scene(), Scene::Level(2));
        session.verify_state();
    }
}
