//! The snake body.
//!
//! Stored head-first in a fixed-capacity deque: a move pushes the new head at
//! the front and drops the tail at the back, which is the same as shifting
//! every segment into its predecessor's cell.

use heapless::Deque;

use crate::config::{CELLS, COLS, ROWS};
use crate::grid::{Direction, Position};

/// Segments of a freshly initialised snake.
pub const START_LEN: usize = 6;

/// Length change applied together with one move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum LengthChange {
    Keep,
    /// Keep the tail, one segment longer (capped at `CELLS`).
    Grow,
    /// Drop one extra tail segment (never below one segment).
    Shrink,
}

impl LengthChange {
    /// The change that moves `pending` one unit towards zero.
    pub const fn from_pending(pending: i16) -> Self {
        if pending > 0 {
            Self::Grow
        } else if pending < 0 {
            Self::Shrink
        } else {
            Self::Keep
        }
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: Deque<Position, CELLS>,
    heading: Direction,
}

impl Snake {
    /// Snake from segments listed head first. Extra segments past `CELLS` are
    /// ignored.
    pub fn new(
        segments: impl IntoIterator<Item = Position>,
        heading: Direction,
    ) -> Self {
        let mut body = Deque::new();
        for pos in segments {
            if body.push_back(pos).is_err() {
                break;
            }
        }
        Self { body, heading }
    }

    /// Horizontal snake in the middle row, heading right.
    pub fn starting() -> Self {
        let row = (ROWS / 2) as u8;
        let head = (COLS / 2 + START_LEN - 1) as u8;
        Self::new((0..START_LEN as u8).map(|i| Position::new(row, head - i)), Direction::Right)
    }

    pub fn head(&self) -> Position { self.body.front().copied().unwrap_or_default() }

    pub fn len(&self) -> usize { self.body.len() }

    pub fn is_empty(&self) -> bool { self.body.is_empty() }

    pub fn heading(&self) -> Direction { self.heading }

    /// Segments head first.
    pub fn segments(&self) -> impl Iterator<Item = &Position> { self.body.iter() }

    pub fn occupies(
        &self,
        pos: Position,
    ) -> bool {
        self.body.iter().any(|&p| p == pos)
    }

    /// True when the head shares a cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }

    /// Move one cell in `dir` (keeping the heading for `Empty`) and apply
    /// `change`. Returns the new head.
    pub fn advance(
        &mut self,
        dir: Direction,
        change: LengthChange,
    ) -> Position {
        if !dir.is_empty() {
            self.heading = dir;
        }
        let new_head = self.head().step(self.heading);

        let drop_tail = match change {
            LengthChange::Keep | LengthChange::Shrink => true,
            LengthChange::Grow => self.body.is_full(),
        };
        if drop_tail {
            self.body.pop_back();
        }
        // Room for the head was made above or checked by `is_full`.
        let _ = self.body.push_front(new_head);

        if change == LengthChange::Shrink && self.body.len() > 1 {
            self.body.pop_back();
        }
        new_head
    }
}

impl Default for Snake {
    fn default() -> Self { Self::starting() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(
        len: u8,
        row: u8,
        head_col: u8,
    ) -> Snake {
        Snake::new((0..len).map(|i| Position::new(row, head_col - i)), Direction::Right)
    }

    #[test]
    fn test_starting_layout() {
        let s = Snake::starting();
        assert_eq!(s.len(), START_LEN);
        assert_eq!(s.heading(), Direction::Right);
        assert_eq!(s.head(), Position::new(ROWS as u8 / 2, (COLS / 2 + 5) as u8));
        let tail = *s.segments().last().unwrap();
        assert_eq!(tail, Position::new(ROWS as u8 / 2, (COLS / 2) as u8));
        assert!(!s.bites_itself());
    }

    #[test]
    fn test_move_shifts_body() {
        let mut s = straight(3, 2, 5);
        let head = s.advance(Direction::Down, LengthChange::Keep);
        assert_eq!(head, Position::new(3, 5));
        let body: Vec<_> = s.segments().copied().collect();
        assert_eq!(body, [Position::new(3, 5), Position::new(2, 5), Position::new(2, 4)]);
        assert_eq!(s.heading(), Direction::Down);
    }

    #[test]
    fn test_move_wraps() {
        let mut s = straight(2, 0, COLS as u8 - 1);
        assert_eq!(s.advance(Direction::Right, LengthChange::Keep), Position::new(0, 0));
        assert_eq!(s.advance(Direction::Up, LengthChange::Keep), Position::new(ROWS as u8 - 1, 0));
    }

    #[test]
    fn test_empty_direction_keeps_heading() {
        let mut s = straight(3, 4, 8);
        assert_eq!(s.advance(Direction::Empty, LengthChange::Keep), Position::new(4, 9));
        assert_eq!(s.heading(), Direction::Right);
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut s = straight(4, 1, 6);
        s.advance(Direction::Right, LengthChange::Grow);
        assert_eq!(s.len(), 5);
        s.advance(Direction::Right, LengthChange::Shrink);
        assert_eq!(s.len(), 4);
        s.advance(Direction::Right, LengthChange::Keep);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_shrink_floors_at_one() {
        let mut s = straight(2, 1, 6);
        s.advance(Direction::Right, LengthChange::Shrink);
        assert_eq!(s.len(), 1);
        s.advance(Direction::Right, LengthChange::Shrink);
        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), Position::new(1, 8));
    }

    #[test]
    fn test_grow_capped_at_cells() {
        let cells = (0..ROWS as u8).flat_map(|r| (0..COLS as u8).map(move |c| Position::new(r, c)));
        let mut s = Snake::new(cells, Direction::Right);
        assert_eq!(s.len(), CELLS);
        s.advance(Direction::Right, LengthChange::Grow);
        assert_eq!(s.len(), CELLS);
    }

    #[test]
    fn test_bites_itself() {
        // Tight loop: the head turns back onto its own fourth segment.
        let mut s = Snake::new(
            [
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(2, 0),
            ],
            Direction::Left,
        );
        assert!(!s.bites_itself());
        s.advance(Direction::Down, LengthChange::Keep);
        assert!(s.bites_itself());
    }

    #[test]
    fn test_pending_to_change() {
        assert_eq!(LengthChange::from_pending(3), LengthChange::Grow);
        assert_eq!(LengthChange::from_pending(-1), LengthChange::Shrink);
        assert_eq!(LengthChange::from_pending(0), LengthChange::Keep);
    }
}
