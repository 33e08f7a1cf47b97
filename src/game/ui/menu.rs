// Menu screens: main menu, instructions, win and lose
//
// Each screen is a list of options bound to a session operation. Up/Down move
// the selection with wrap-around and Confirm runs the selected operation.

use log::{debug, info};

use crate::engine::input::{Action, PlayerInput};
use crate::game::scene::Scene;
use crate::game::session::GameSession;

/// Session operation triggered by a menu option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Instructions,
    Exit,
    /// Leave the instructions screen
    Back,
    Retry,
    NextLevel,
    MainMenu,
    FirstLevel,
}

impl MenuAction {
    pub fn apply(self, session: &mut GameSession) {
        info!("Menu: {:?}", self);
        match self {
            Self::Play => session.start_game(),
            Self::Instructions => session.show_instructions(),
            Self::Exit => session.exit_game(),
            Self::Back | Self::MainMenu => session.back_to_menu(),
            Self::Retry => session.restart_level(),
            Self::NextLevel => session.next_level(),
            Self::FirstLevel => session.back_to_first_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: &'static str,
    pub action: MenuAction,
}

impl MenuOption {
    fn new(label: &'static str, action: MenuAction) -> Self {
        Self { label, action }
    }
}

#[derive(Debug, Clone)]
pub struct MenuScreen {
    pub title: String,
    pub lines: Vec<String>,
    pub options: Vec<MenuOption>,
    selected: usize,
    /// Option run by the Back action, if the screen has one
    back: Option<MenuAction>,
}

impl MenuScreen {
    fn new(title: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            options,
            selected: 0,
            back: None,
        }
    }

    fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|line| line.to_string()).collect();
        self
    }

    fn with_back(mut self, action: MenuAction) -> Self {
        self.back = Some(action);
        self
    }

    pub fn main_menu() -> Self {
        Self::new(
            "RUSTED PLATFORMER",
            vec![
                MenuOption::new("Play", MenuAction::Play),
                MenuOption::new("Instructions", MenuAction::Instructions),
                MenuOption::new("Exit", MenuAction::Exit),
            ],
        )
        .with_back(MenuAction::Exit)
    }

    pub fn instructions() -> Self {
        Self::new("INSTRUCTIONS", vec![MenuOption::new("Back", MenuAction::Back)])
            .with_lines(&[
                "A/D or arrows: move",
                "W, Space or Up: jump",
                "J or left click: attack",
                "Jump on enemies to squish them",
                "Collect coins and gems, keys open locked blocks",
                "Complete the objectives and reach the flag",
            ])
            .with_back(MenuAction::Back)
    }

    pub fn win(score: u32) -> Self {
        let mut screen = Self::new(
            "VICTORY!",
            vec![
                MenuOption::new("Retry", MenuAction::Retry),
                MenuOption::new("Next level", MenuAction::NextLevel),
                MenuOption::new("Main menu", MenuAction::MainMenu),
            ],
        )
        .with_back(MenuAction::MainMenu);
        screen.lines.push(format!("Score: {score}"));
        screen
    }

    pub fn lose() -> Self {
        Self::new(
            "GAME OVER",
            vec![
                MenuOption::new("Main menu", MenuAction::MainMenu),
                MenuOption::new("First level", MenuAction::FirstLevel),
            ],
        )
        .with_lines(&["Try again!"])
        .with_back(MenuAction::MainMenu)
    }

    /// Screen shown for a non-level scene
    pub fn for_scene(scene: Scene, session: &GameSession) -> Option<Self> {
        match scene {
            Scene::MainMenu => Some(Self::main_menu()),
            Scene::Instructions => Some(Self::instructions()),
            Scene::Win => Some(Self::win(session.score())),
            Scene::Lose => Some(Self::lose()),
            Scene::Level(_) => None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&MenuOption> {
        self.options.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Consume menu presses and run the chosen operation.
    /// Returns the action that was triggered, if any.
    pub fn handle_input(
        &mut self,
        input: &mut PlayerInput,
        session: &mut GameSession,
    ) -> Option<MenuAction> {
        if input.consume_buffered(Action::MenuUp) {
            self.select_previous();
        }
        if input.consume_buffered(Action::MenuDown) {
            self.select_next();
        }

        let chosen = if input.consume_buffered(Action::Confirm) {
            self.selected_option().map(|option| option.action)
        } else if input.consume_buffered(Action::Back) {
            self.back
        } else {
            None
        };

        if let Some(action) = chosen {
            debug!("'{}' chose {:?}", self.title, action);
            action.apply(session);
        }
        chosen
    }

    /// Single-line rendering used as the window title
    pub fn status_line(&self) -> String {
        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                if i == self.selected {
                    format!("> {} <", option.label)
                } else {
                    option.label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("   ");

        let mut parts = vec![self.title.clone()];
        parts.extend(self.lines.iter().cloned());
        parts.push(options);
        parts.join(" | ")
    }
}
