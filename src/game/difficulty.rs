//! Difficulty profiles.
//!
//! Periods and time-to-live values are counted in game ticks
//! (`GAME_RATE_HZ`, 20 Hz), so changing the tick rate changes the pacing.

use crate::config::{CELLS, COLS};

/// Selectable difficulty, cycled on the idle screen with Left/Right.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Easy → Medium → Hard → Easy.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    /// Easy → Hard → Medium → Easy.
    #[inline]
    pub const fn prev(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }

    #[inline]
    pub const fn profile(self) -> &'static DifficultyProfile {
        match self {
            Self::Easy => &EASY,
            Self::Medium => &MEDIUM,
            Self::Hard => &HARD,
        }
    }
}

/// Tuning constants of one difficulty. Never mutated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Ticks between two snake moves.
    pub move_period: u16,
    /// Ticks between two normal-fruit spawn attempts.
    pub food_period: u16,
    /// Ticks between two hazard spawn attempts.
    pub hazard_period: u16,
    /// Chance (%) that a normal-fruit spawn attempt succeeds.
    pub food_chance: u8,
    /// Chance (%) that a hazard spawn attempt succeeds.
    pub hazard_chance: u8,
    pub max_food: u8,
    pub max_hazard: u8,
    /// Lifetime of a normal fruit in ticks.
    pub food_ttl: u16,
    /// Lifetime of a hazard in ticks.
    pub hazard_ttl: u16,
    /// Shorter than this loses. Must be <= COLS.
    pub min_len: usize,
    /// Longer than this wins.
    pub winning_len: usize,
    /// Segments gained per normal fruit.
    pub growth: u8,
    /// Segments lost per hazard.
    pub shrink: u8,
}

pub const EASY: DifficultyProfile = DifficultyProfile {
    difficulty: Difficulty::Easy,
    move_period: 5,
    food_period: 10,
    hazard_period: 40,
    food_chance: 80,
    hazard_chance: 30,
    max_food: 3,
    max_hazard: 1,
    food_ttl: 100,
    hazard_ttl: 60,
    min_len: 4,
    winning_len: 30,
    growth: 2,
    shrink: 1,
};

pub const MEDIUM: DifficultyProfile = DifficultyProfile {
    difficulty: Difficulty::Medium,
    move_period: 4,
    food_period: 20,
    hazard_period: 30,
    food_chance: 70,
    hazard_chance: 50,
    max_food: 2,
    max_hazard: 2,
    food_ttl: 80,
    hazard_ttl: 100,
    min_len: 4,
    winning_len: 40,
    growth: 2,
    shrink: 2,
};

pub const HARD: DifficultyProfile = DifficultyProfile {
    difficulty: Difficulty::Hard,
    move_period: 3,
    food_period: 30,
    hazard_period: 20,
    food_chance: 60,
    hazard_chance: 70,
    max_food: 1,
    max_hazard: 3,
    food_ttl: 60,
    hazard_ttl: 140,
    min_len: 5,
    winning_len: 50,
    growth: 3,
    shrink: 2,
};

// Profiles must leave room to win on the board.
const _: () = {
    let profiles = [EASY, MEDIUM, HARD];
    let mut i = 0;
    while i < profiles.len() {
        assert!(profiles[i].min_len <= COLS);
        assert!(profiles[i].winning_len < CELLS);
        assert!(profiles[i].move_period > 0);
        i += 1;
    }
};
