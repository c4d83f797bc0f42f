//! Fixed-capacity ring buffer of pending directions.
//!
//! Back-pressure is drop-newest: pushing into a full queue is a silent no-op.
//! This type is not synchronised on its own; it lives inside
//! [`Controls`](super::Controls), which wraps every access in a critical section.

use crate::config::QUEUE_CAPACITY;
use crate::grid::Direction;

/// Ring buffer of directions waiting for the next movement tick.
///
/// Invariant: `occupied <= QUEUE_CAPACITY` and
/// `tail == (head + occupied) % QUEUE_CAPACITY`.
#[derive(Clone, Debug)]
pub struct DirectionQueue {
    slots: [Direction; QUEUE_CAPACITY],
    head: usize,
    tail: usize,
    occupied: usize,
}

impl DirectionQueue {
    pub const fn new() -> Self {
        Self {
            slots: [Direction::Empty; QUEUE_CAPACITY],
            head: 0,
            tail: 0,
            occupied: 0,
        }
    }

    /// Append `dir`. Dropped when the queue is full.
    ///
    /// Returns whether the direction was stored.
    pub fn push(
        &mut self,
        dir: Direction,
    ) -> bool {
        if self.occupied >= QUEUE_CAPACITY {
            return false;
        }
        self.slots[self.tail] = dir;
        self.tail = (self.tail + 1) % QUEUE_CAPACITY;
        self.occupied += 1;
        true
    }

    /// Remove and return the oldest direction. `None` leaves the queue untouched.
    pub fn pop(&mut self) -> Option<Direction> {
        if self.occupied == 0 {
            return None;
        }
        let dir = self.slots[self.head];
        self.head = (self.head + 1) % QUEUE_CAPACITY;
        self.occupied -= 1;
        Some(dir)
    }

    /// Oldest queued direction, without removing it.
    pub fn peek(&self) -> Option<Direction> {
        if self.occupied == 0 {
            return None;
        }
        Some(self.slots[self.head])
    }

    /// Newest queued direction, without removing it.
    pub fn peek_last(&self) -> Option<Direction> {
        if self.occupied == 0 {
            return None;
        }
        Some(self.slots[(self.tail + QUEUE_CAPACITY - 1) % QUEUE_CAPACITY])
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.occupied = 0;
    }

    #[inline]
    pub const fn len(&self) -> usize { self.occupied }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.occupied == 0 }

    #[inline]
    pub const fn is_full(&self) -> bool { self.occupied == QUEUE_CAPACITY }
}

impl Default for DirectionQueue {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
