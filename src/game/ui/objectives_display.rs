// Compact objectives block shown next to the HUD

use crate::game::objectives::LevelObjectives;

pub const HEADER: &str = "OBJECTIVES:";
pub const EMPTY_TEXT: &str = "No objectives configured";

/// Text lines of the objectives block, rebuilt every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectivesDisplay {
    pub lines: Vec<String>,
    /// All objectives met (drawn highlighted)
    pub all_completed: bool,
}

impl ObjectivesDisplay {
    pub fn build(objectives: Option<&LevelObjectives>) -> Self {
        let Some(objectives) = objectives else {
            return Self {
                lines: vec![EMPTY_TEXT.to_string()],
                all_completed: false,
            };
        };

        let mut lines = vec![HEADER.to_string()];
        lines.extend(objectives.objectives().iter().map(|o| {
            format!(
                "{} {} ({}/{})",
                o.mark(),
                o.short_label(),
                o.current(),
                o.required
            )
        }));

        Self {
            lines,
            all_completed: !objectives.is_empty()
                && objectives.objectives().iter().all(|o| o.is_completed()),
        }
    }

    /// Objective lines without the header, joined for a single-line display
    pub fn inline(&self) -> String {
        self.lines
            .iter()
            .filter(|line| line.as_str() != HEADER)
            .cloned()
            .collect::<Vec<_>>()
            .join("  ")
    }
}
