//! Playfield geometry: movement directions and toroidal positions.
//!
//! The playfield wraps at every edge, so leaving through the right border
//! re-enters on the left of the same row.

use crate::config::{COLS, ROWS};

// =============================================================================
// Direction
// =============================================================================

/// Movement direction as delivered by the buttons.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Sentinel: no direction available.
    #[default]
    Empty,
}

impl Direction {
    /// The four real directions, in button order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row/column step for one move. `Empty` does not move.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Empty => (0, 0),
        }
    }

    /// The direction that would reverse into the snake's own neck.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Empty => Self::Empty,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool { matches!(self, Self::Empty) }
}

// =============================================================================
// Position
// =============================================================================

/// A cell on the `ROWS x COLS` torus.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(
        row: u8,
        col: u8,
    ) -> Self {
        Self { row, col }
    }

    /// Neighbouring cell in `dir`, wrapping around the edges.
    ///
    /// `((row + dr + ROWS) mod ROWS, (col + dc + COLS) mod COLS)`
    #[inline]
    pub const fn step(
        self,
        dir: Direction,
    ) -> Self {
        let (dr, dc) = dir.delta();
        let row = (self.row as i16 + dr as i16 + ROWS as i16) % ROWS as i16;
        let col = (self.col as i16 + dc as i16 + COLS as i16) % COLS as i16;
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// True when the position lies on the matrix.
    #[inline]
    pub const fn is_on_grid(self) -> bool { (self.row as usize) < ROWS && (self.col as usize) < COLS }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::Empty.opposite(), Direction::Empty);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Direction::default().is_empty());
    }

    #[test]
    fn test_step_inside_grid() {
        let p = Position::new(3, 7);
        assert_eq!(p.step(Direction::Up), Position::new(2, 7));
        assert_eq!(p.step(Direction::Down), Position::new(4, 7));
        assert_eq!(p.step(Direction::Left), Position::new(3, 6));
        assert_eq!(p.step(Direction::Right), Position::new(3, 8));
        assert_eq!(p.step(Direction::Empty), p);
    }

    #[test]
    fn test_step_wraps_every_edge() {
        let last_row = (ROWS - 1) as u8;
        let last_col = (COLS - 1) as u8;
        assert_eq!(Position::new(0, 4).step(Direction::Up), Position::new(last_row, 4));
        assert_eq!(Position::new(last_row, 4).step(Direction::Down), Position::new(0, 4));
        assert_eq!(Position::new(2, 0).step(Direction::Left), Position::new(2, last_col));
        assert_eq!(Position::new(2, last_col).step(Direction::Right), Position::new(2, 0));
    }

    #[test]
    fn test_step_matches_modular_formula_everywhere() {
        for row in 0..ROWS {
            for col in 0..COLS {
                let p = Position::new(row as u8, col as u8);
                for dir in Direction::ALL {
                    let (dr, dc) = dir.delta();
                    let expected = Position::new(
                        ((row as i32 + dr as i32 + ROWS as i32) % ROWS as i32) as u8,
                        ((col as i32 + dc as i32 + COLS as i32) % COLS as i32) as u8,
                    );
                    let next = p.step(dir);
                    assert_eq!(next, expected);
                    assert!(next.is_on_grid());
                }
            }
        }
    }
}
