// Per-level win/lose rules

use log::info;

use super::session::GameSession;

/// Delay between the end of a level and the result screen
pub const RESULT_DELAY: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Won,
    Lost,
}

/// Win by score or by surviving, lose at zero hit points. Fires at most once.
///
/// The score goal counts points earned in this level only: the session score
/// held when the level starts is the baseline.
#[derive(Debug, Clone)]
pub struct GameRules {
    pub score_goal: Option<u32>,
    pub time_limit: Option<f32>,
    score_baseline: Option<u32>,
    elapsed: f32,
    outcome: Option<RuleOutcome>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl GameRules {
    pub fn new(score_goal: Option<u32>, time_limit: Option<f32>) -> Self {
        Self {
            score_goal,
            time_limit,
            score_baseline: None,
            elapsed: 0.0,
            outcome: None,
        }
    }

    /// Only the player's death ends the level
    pub fn survival_only() -> Self {
        Self::default()
    }

    pub fn with_score_goal(mut self, goal: u32) -> Self {
        self.score_goal = Some(goal);
        self
    }

    pub fn with_time_limit(mut self, seconds: f32) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Record the session score at level start. Later calls are ignored.
    pub fn begin(&mut self, session_score: u32) {
        if self.score_baseline.is_none() {
            self.score_baseline = Some(session_score);
        }
    }

    /// Points earned since `begin`
    pub fn level_score(&self, session: &GameSession) -> u32 {
        session
            .score()
            .saturating_sub(self.score_baseline.unwrap_or(0))
    }

    /// Advance the clock and check the conditions. Returns the outcome on the
    /// step it is decided.
    pub fn update(&mut self, dt: f32, session: &GameSession, player_hp: u32) -> Option<RuleOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        self.elapsed += dt;

        if self.check_victory(session) {
            return self.finish(RuleOutcome::Won);
        }
        if player_hp == 0 {
            info!("Defeat! The player ran out of hit points");
            return self.finish(RuleOutcome::Lost);
        }
        None
    }

    fn check_victory(&self, session: &GameSession) -> bool {
        if let Some(goal) = self.score_goal {
            let earned = self.level_score(session);
            if earned >= goal {
                info!("Victory! Level score reached: {earned}");
                return true;
            }
        }
        if let Some(limit) = self.time_limit {
            if self.elapsed >= limit {
                info!("Victory by surviving {limit} seconds!");
                return true;
            }
        }
        false
    }

    fn finish(&mut self, outcome: RuleOutcome) -> Option<RuleOutcome> {
        self.outcome = Some(outcome);
        Some(outcome)
    }

    pub fn force_win(&mut self) -> Option<RuleOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        self.finish(RuleOutcome::Won)
    }

    pub fn force_lose(&mut self) -> Option<RuleOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        self.finish(RuleOutcome::Lost)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds left on the survival clock (zero without a time limit)
    pub fn remaining(&self) -> f32 {
        self.time_limit
            .map(|limit| (limit - self.elapsed).max(0.0))
            .unwrap_or(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<RuleOutcome> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_score_goal_wins_once() {
        let mut rules = GameRules::default().with_score_goal(50);
        let mut session = GameSession::new();

        assert_eq!(rules.update(0.1, &session, 3), None);
        session.add_score(50);
        assert_eq!(rules.update(0.1, &session, 3), Some(RuleOutcome::Won));
        assert!(rules.is_finished());
        assert_eq!(rules.update(0.1, &session, 0), None);
        assert_eq!(rules.outcome(), Some(RuleOutcome::Won));
    }

    #[test]
    fn test_score_goal_ignores_score_from_earlier_levels() {
        let mut rules = GameRules::survival_only().with_score_goal(150);
        let mut session = GameSession::new();
        session.add_score(200);
        rules.begin(session.score());

        assert_eq!(rules.update(0.1, &session, 3), None);
        assert_eq!(rules.level_score(&session), 0);

        session.add_score(140);
        assert_eq!(rules.update(0.1, &session, 3), None);
        rules.begin(session.score());
        session.add_score(10);
        assert_eq!(rules.level_score(&session), 150);
        assert_eq!(rules.update(0.1, &session, 3), Some(RuleOutcome::Won));
    }

    #[test]
    fn test_death_loses() {
        let mut rules = GameRules::survival_only();
        let session = GameSession::new();
        assert_eq!(rules.update(0.1, &session, 1), None);
        assert_eq!(rules.update(0.1, &session, 0), Some(RuleOutcome::Lost));
    }

    #[test]
    fn test_time_limit() {
        let mut rules = GameRules::default().with_time_limit(1.0);
        let session = GameSession::new();
        assert_eq!(rules.update(0.6, &session, 3), None);
        assert_relative_eq!(rules.remaining(), 0.4, epsilon = 1e-5);
        assert_eq!(rules.update(0.6, &session, 3), Some(RuleOutcome::Won));
        assert_relative_eq!(rules.remaining(), 0.0);
        assert_relative_eq!(rules.elapsed(), 1.2, epsilon = 1e-5);
    }

    #[test]
    fn test_no_time_limit_remaining_is_zero() {
        let rules = GameRules::default();
        assert_relative_eq!(rules.remaining(), 0.0);
    }

    #[test]
    fn test_force_outcomes() {
        let mut rules = GameRules::default();
        assert_eq!(rules.force_lose(), Some(RuleOutcome::Lost));
        assert_eq!(rules.force_win(), None);
        assert_eq!(rules.outcome(), Some(RuleOutcome::Lost));
    }
}
