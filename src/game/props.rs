// Interactive level props: locked blocks and end-of-level flags

use log::{info, warn};

use super::objectives::LevelObjectives;
use super::session::GameSession;

/// Seconds an unlocked block stays before despawning
pub const UNLOCK_DESPAWN_DELAY: f32 = 0.5;

/// Seconds between touching a completed victory flag and the win screen
pub const VICTORY_DELAY: f32 = 1.5;

/// Solid block opened with keys
#[derive(Debug, Clone)]
pub struct LockedBlock {
    pub requires_key: bool,
    pub keys_required: u32,
    unlocked: bool,
}

impl Default for LockedBlock {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LockedBlock {
    pub fn new(keys_required: u32) -> Self {
        Self {
            requires_key: true,
            keys_required,
            unlocked: false,
        }
    }

    /// Player touched the block. Returns true when it unlocked just now.
    pub fn on_player_contact(&mut self, session: &mut GameSession) -> bool {
        if self.unlocked {
            return false;
        }
        if !self.requires_key {
            return self.force_unlock();
        }

        if session.key_count() >= self.keys_required {
            for _ in 0..self.keys_required {
                session.use_key();
            }
            info!("Block unlocked with {} key(s)", self.keys_required);
            self.force_unlock()
        } else {
            info!("You need {} key(s) to open this block!", self.keys_required);
            false
        }
    }

    /// Open without spending keys. Returns false if it was already open.
    pub fn force_unlock(&mut self) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        true
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

/// Which flag art is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagVisual {
    Completed,
    Incomplete,
}

/// End-of-level trigger gated on the level objectives
#[derive(Debug, Clone)]
pub struct VictoryFlag {
    require_objectives: bool,
    triggered: bool,
    visual: FlagVisual,
}

impl VictoryFlag {
    /// `has_objectives` tells whether the level defines an objective list at all
    pub fn new(require_objectives: bool, has_objectives: bool) -> Self {
        let require_objectives = if require_objectives && !has_objectives {
            warn!("Victory flag found no level objectives, objective check disabled");
            false
        } else {
            require_objectives
        };
        Self {
            require_objectives,
            triggered: false,
            visual: FlagVisual::Incomplete,
        }
    }

    pub fn requires_objectives(&self) -> bool {
        self.require_objectives
    }

    /// Follow the objective state (called each fixed step)
    pub fn update_visuals(&mut self, objectives: Option<&LevelObjectives>) {
        if !self.require_objectives {
            return;
        }
        if let Some(objectives) = objectives {
            self.visual = if objectives.all_completed() {
                FlagVisual::Completed
            } else {
                FlagVisual::Incomplete
            };
        }
    }

    pub fn visual(&self) -> FlagVisual {
        self.visual
    }

    /// Player entered the flag. Returns true when the level is completed now
    /// and the win screen should be scheduled.
    pub fn on_player_enter(&mut self, objectives: Option<&LevelObjectives>) -> bool {
        if self.triggered {
            return false;
        }

        match objectives {
            Some(objectives) if self.require_objectives && !objectives.all_completed() => {
                info!("Cannot complete the level yet. Pending objectives:");
                objectives.log_report();
                false
            }
            _ => self.complete(objectives),
        }
    }

    /// Complete regardless of objectives
    pub fn force_victory(&mut self, objectives: Option<&LevelObjectives>) -> bool {
        if self.triggered {
            return false;
        }
        info!("Forcing victory");
        self.complete(objectives)
    }

    fn complete(&mut self, objectives: Option<&LevelObjectives>) -> bool {
        self.triggered = true;
        info!("Level complete! Victory!");
        if let Some(objectives) = objectives {
            objectives.log_report();
        }
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

/// Trigger that jumps straight to the win screen
#[derive(Debug, Clone, Default)]
pub struct WinFlag;

impl WinFlag {
    pub fn on_player_enter(&self, session: &mut GameSession) {
        session.player_won();
    }
}
