// Level objectives polled against the session

use std::cell::Cell;

use log::{info, warn};

use super::collectables::CollectableKind;
use super::session::GameSession;

pub const COMPLETED_MARK: &str = "✓";
pub const PENDING_MARK: &str = "○";

/// What an objective counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    Score,
    Collectable(CollectableKind),
    Keys,
}

/// One requirement and the progress observed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub required: u32,
    current: u32,
}

impl Objective {
    pub fn new(kind: ObjectiveKind, required: u32) -> Self {
        Self {
            kind,
            required,
            current: 0,
        }
    }

    pub fn score(required: u32) -> Self {
        Self::new(ObjectiveKind::Score, required)
    }

    pub fn collect(kind: CollectableKind, required: u32) -> Self {
        Self::new(ObjectiveKind::Collectable(kind), required)
    }

    pub fn keys(required: u32) -> Self {
        Self::new(ObjectiveKind::Keys, required)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_completed(&self) -> bool {
        self.current >= self.required
    }

    pub fn update_progress(&mut self, amount: u32) {
        self.current = amount;
    }

    pub fn reset_progress(&mut self) {
        self.current = 0;
    }

    /// Read this objective's counter from the session
    pub fn poll(&mut self, session: &GameSession) {
        let amount = match self.kind {
            ObjectiveKind::Score => session.score(),
            ObjectiveKind::Keys => session.key_count(),
            ObjectiveKind::Collectable(kind) => session.collectable_count(kind),
        };
        self.update_progress(amount);
    }

    /// Sentence form, e.g. "Collect 5 coins"
    pub fn description(&self) -> String {
        match self.kind {
            ObjectiveKind::Score => format!("Get {} points", self.required),
            ObjectiveKind::Keys => format!("Collect {} keys", self.required),
            ObjectiveKind::Collectable(kind) => {
                format!("Collect {} {}", self.required, kind.plural_name())
            }
        }
    }

    /// Compact form for the HUD, e.g. "Coins: 5"
    pub fn short_label(&self) -> String {
        match self.kind {
            ObjectiveKind::Score => format!("Points: {}", self.required),
            ObjectiveKind::Keys => format!("Keys: {}", self.required),
            ObjectiveKind::Collectable(kind) => format!("{}: {}", kind.label(), self.required),
        }
    }

    pub fn mark(&self) -> &'static str {
        if self.is_completed() {
            COMPLETED_MARK
        } else {
            PENDING_MARK
        }
    }
}

/// The objective list of a level
#[derive(Debug, Default)]
pub struct LevelObjectives {
    objectives: Vec<Objective>,
    warned_empty: Cell<bool>,
}

impl LevelObjectives {
    pub fn new(objectives: Vec<Objective>) -> Self {
        Self {
            objectives,
            warned_empty: Cell::new(false),
        }
    }

    /// 100 points, 5 coins and 3 red gems
    pub fn basic() -> Self {
        Self::new(vec![
            Objective::score(100),
            Objective::collect(CollectableKind::Coin, 5),
            Objective::collect(CollectableKind::GemRed, 3),
        ])
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Refresh every objective from the session (called each fixed step)
    pub fn update(&mut self, session: &GameSession) {
        for objective in &mut self.objectives {
            objective.poll(session);
        }
    }

    /// True when every objective is met; an empty list counts as met
    pub fn all_completed(&self) -> bool {
        if self.objectives.is_empty() {
            if !self.warned_empty.replace(true) {
                warn!("No objectives configured for this level");
            }
            return true;
        }
        self.objectives.iter().all(Objective::is_completed)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter().filter(|o| !o.is_completed())
    }

    /// Numbered progress lines, e.g. "1. Get 100 points [40/100] ○ PENDING"
    pub fn report_lines(&self) -> Vec<String> {
        self.objectives
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let status = if o.is_completed() {
                    format!("{COMPLETED_MARK} COMPLETED")
                } else {
                    format!("{PENDING_MARK} PENDING")
                };
                format!(
                    "{}. {} [{}/{}] {}",
                    i + 1,
                    o.description(),
                    o.current(),
                    o.required,
                    status
                )
            })
            .collect()
    }

    pub fn log_report(&self) {
        info!("=== LEVEL OBJECTIVES ===");
        if self.objectives.is_empty() {
            info!("No objectives configured");
            return;
        }
        for line in self.report_lines() {
            info!("{line}");
        }
        info!("========================");
    }

    pub fn reset(&mut self) {
        for objective in &mut self.objectives {
            objective.reset_progress();
        }
        info!("Objectives reset");
    }
}
