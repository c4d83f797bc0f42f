//! Top-level game state and its transition table.

/// Which screen the game is on.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum GameState {
    /// Difficulty selection menu.
    #[default]
    Idle,
    Running,
    Won,
    Lost,
}

/// Every transition the engine may take. Anything else is refused.
pub const TRANSITIONS: [(GameState, GameState); 7] = [
    (GameState::Idle, GameState::Running),
    (GameState::Running, GameState::Won),
    (GameState::Running, GameState::Lost),
    (GameState::Won, GameState::Idle),
    (GameState::Won, GameState::Running),
    (GameState::Lost, GameState::Idle),
    (GameState::Lost, GameState::Running),
];

impl GameState {
    /// Whether `self -> to` appears in [`TRANSITIONS`].
    pub fn can_transition(
        self,
        to: Self,
    ) -> bool {
        TRANSITIONS.contains(&(self, to))
    }

    /// Won or Lost.
    #[inline]
    pub const fn is_over(self) -> bool { matches!(self, Self::Won | Self::Lost) }
}
