// Player state machine

/// Represents the current state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Running,
    /// Jumping or falling
    Airborne,
    /// Knocked back after taking damage
    Hurt,
    /// Out of hit points
    Dead,
}

impl PlayerState {
    pub fn can_attack(&self) -> bool {
        !matches!(self, Self::Hurt | Self::Dead)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "run",
            Self::Airborne => "jump",
            Self::Hurt => "hurt",
            Self::Dead => "dead",
        }
    }
}

/// State machine that derives the player state from physics and damage flags
#[derive(Debug, Default)]
pub struct PlayerStateMachine {
    current_state: PlayerState,
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    /// Update the state machine (called every fixed step)
    pub fn update(&mut self, grounded: bool, moving: bool, damaged: bool) {
        // Dead is terminal
        if self.current_state == PlayerState::Dead {
            return;
        }

        self.current_state = if damaged {
            PlayerState::Hurt
        } else if !grounded {
            PlayerState::Airborne
        } else if moving {
            PlayerState::Running
        } else {
            PlayerState::Idle
        };
    }

    pub fn hurt(&mut self) {
        if self.current_state != PlayerState::Dead {
            self.current_state = PlayerState::Hurt;
        }
    }

    pub fn die(&mut self) {
        self.current_state = PlayerState::Dead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = PlayerStateMachine::new();
        assert_eq!(sm.state(), PlayerState::Idle);
    }

    #[test]
    fn test_update_from_flags() {
        let mut sm = PlayerStateMachine::new();
        sm.update(true, true, false);
        assert_eq!(sm.state(), PlayerState::Running);
        sm.update(false, true, false);
        assert_eq!(sm.state(), PlayerState::Airborne);
        sm.update(true, false, true);
        assert_eq!(sm.state(), PlayerState::Hurt);
        sm.update(true, false, false);
        assert_eq!(sm.state(), PlayerState::Idle);
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut sm = PlayerStateMachine::new();
        sm.die();
        sm.hurt();
        sm.update(true, true, false);
        assert_eq!(sm.state(), PlayerState::Dead);
    }

    #[test]
    fn test_state_capabilities() {
        assert!(PlayerState::Idle.can_attack());
        assert!(!PlayerState::Hurt.can_attack());
        assert!(!PlayerState::Dead.can_attack());
        assert_eq!(PlayerState::Running.animation_name(), "run");
    }
}
