// Top-level game director
//
// Owns the session and the active screen (a menu or a running level) and turns
// the session's navigation requests into screen changes.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::level::Level;
use super::scene::{Scene, Transition};
use super::session::GameSession;
use super::ui::{Hud, MenuScreen};
use crate::engine::input::{Action, InputContext, PlayerInput};

/// Whether the app should keep running after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

enum Screen {
    Menu(MenuScreen),
    Level(Box<Level>),
}

pub struct Game {
    session: GameSession,
    screen: Screen,
    rng: StdRng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_session(GameSession::new(), StdRng::from_entropy())
    }

    pub fn with_session(mut session: GameSession, rng: StdRng) -> Self {
        session.scene_loaded(Scene::MainMenu);
        Self {
            session,
            screen: Screen::Menu(MenuScreen::main_menu()),
            rng,
        }
    }

    /// Advance the active screen by one fixed step and apply any scene change
    pub fn fixed_update(&mut self, input: &mut PlayerInput, dt: f32, time: f64) -> Flow {
        if input.consume_buffered(Action::Debug) {
            self.dump_state();
        }

        match &mut self.screen {
            Screen::Menu(menu) => {
                menu.handle_input(input, &mut self.session);
            }
            Screen::Level(level) => {
                if input.consume_buffered(Action::Back) {
                    info!("Leaving {} for the main menu", level.name());
                    self.session.back_to_menu();
                } else {
                    level.fixed_update(input, &mut self.session, dt, time);
                }
            }
        }

        self.apply_transitions()
    }

    fn apply_transitions(&mut self) -> Flow {
        while let Some(transition) = self.session.take_transition() {
            match transition {
                Transition::Exit => return Flow::Exit,
                Transition::Load(scene) => self.enter(scene),
            }
        }
        Flow::Continue
    }

    fn enter(&mut self, scene: Scene) {
        let screen = match scene {
            Scene::Level(number) => match Level::from_catalog(number, &mut self.rng) {
                Ok(level) => Screen::Level(Box::new(level)),
                Err(e) => {
                    warn!("Cannot load level {number}: {e}");
                    self.session.back_to_menu();
                    return;
                }
            },
            _ => match MenuScreen::for_scene(scene, &self.session) {
                Some(menu) => Screen::Menu(menu),
                None => return,
            },
        };
        self.screen = screen;
        self.session.scene_loaded(scene);
    }

    fn dump_state(&self) {
        self.session.verify_state();
        if let Screen::Level(level) = &self.screen {
            match level.objectives() {
                Some(objectives) => objectives.log_report(),
                None => info!("{} has no objectives", level.name()),
            }
        }
    }

    /// Binding set the input manager should use for the active screen
    pub fn input_context(&self) -> InputContext {
        match self.screen {
            Screen::Menu(_) => InputContext::Menu,
            Screen::Level(_) => InputContext::Gameplay,
        }
    }

    /// HUD line while playing, menu text otherwise
    pub fn title(&self) -> String {
        match &self.screen {
            Screen::Menu(menu) => menu.status_line(),
            Screen::Level(level) => format!(
                "{} | {}",
                level.name(),
                Hud::new(&self.session, level).status_line()
            ),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn level(&self) -> Option<&Level> {
        match &self.screen {
            Screen::Level(level) => Some(level.as_ref()),
            Screen::Menu(_) => None,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FIXED_TIMESTEP;
    use crate::game::scene::SceneConfig;

    fn game() -> Game {
        Game::with_session(GameSession::new(), StdRng::seed_from_u64(11))
    }

    fn step(game: &mut Game, input: &mut PlayerInput) -> Flow {
        let flow = game.fixed_update(input, FIXED_TIMESTEP, 0.0);
        input.update();
        flow
    }

    #[test]
    fn test_starts_on_main_menu() {
        let game = game();
        assert_eq!(game.session().current_scene(), Scene::MainMenu);
        assert_eq!(game.input_context(), InputContext::Menu);
        assert!(game.level().is_none());
        assert!(game.title().starts_with("RUSTED PLATFORMER"));
    }

    #[test]
    fn test_play_loads_first_level() {
        let mut game = game();
        let mut input = PlayerInput::new();

        input.press(Action::Confirm);
        assert_eq!(step(&mut game, &mut input), Flow::Continue);

        assert_eq!(game.session().current_scene(), Scene::Level(1));
        assert_eq!(game.input_context(), InputContext::Gameplay);
        assert_eq!(game.level().map(|l| l.number()), Some(1));
        assert!(game.title().starts_with("Meadow | Score: 0 | Keys: 0 | HP: 3"));
    }

    #[test]
    fn test_back_from_level_returns_to_menu() {
        let mut game = game();
        let mut input = PlayerInput::new();
        input.press(Action::Confirm);
        step(&mut game, &mut input);
        input.release(Action::Confirm);

        input.press(Action::Back);
        step(&mut game, &mut input);
        assert_eq!(game.session().current_scene(), Scene::MainMenu);
        assert!(game.level().is_none());
    }

    #[test]
    fn test_exit_from_menu() {
        let mut game = game();
        let mut input = PlayerInput::new();

        input.press(Action::MenuDown);
        step(&mut game, &mut input);
        input.release(Action::MenuDown);
        input.press(Action::MenuDown);
        step(&mut game, &mut input);

        input.press(Action::Confirm);
        assert_eq!(step(&mut game, &mut input), Flow::Exit);
    }

    #[test]
    fn test_missing_level_falls_back_to_menu() {
        let config = SceneConfig {
            max_levels: 5,
            ..SceneConfig::default()
        };
        let mut session = GameSession::with_config(config);
        session.load_level(5).expect("level 5 is configured");
        let mut game = Game::with_session(session, StdRng::seed_from_u64(1));

        let mut input = PlayerInput::new();
        assert_eq!(step(&mut game, &mut input), Flow::Continue);
        assert_eq!(game.session().current_scene(), Scene::MainMenu);
        assert!(game.level().is_none());
    }

    #[test]
    fn test_win_screen_after_victory() {
        let mut game = game();
        game.session.player_won();
        let mut input = PlayerInput::new();
        step(&mut game, &mut input);

        assert_eq!(game.session().current_scene(), Scene::Win);
        assert!(game.title().starts_with("VICTORY! | Score: 0"));
    }
}
