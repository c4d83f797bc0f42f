//! Shared button/tick state.
//!
//! [`Controls`] is the single object written from both the button context
//! (edge-triggered presses) and the game tick. Every method takes one short
//! critical section through embassy-sync's `CriticalSectionRawMutex`; the
//! critical section nests safely, so a press arriving while the tick holds the
//! lock is simply delayed until it is released.
//!
//! # Fields behind the lock
//!
//! | Field | Written by | Read by |
//! |-------|-----------|---------|
//! | `queue` | buttons (push), tick (pop, clear) | both |
//! | `heading` | tick | buttons (admission filter) |
//! | `state` | tick | buttons (routing, debounce window) |
//! | `requests` | buttons | tick (taken once per tick) |
//! | gesture counters, `last_press_ms` | buttons | buttons |

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use super::admission;
use super::queue::DirectionQueue;
use crate::config::{END_DEBOUNCE_MS, GESTURE_PRESSES, IDLE_DEBOUNCE_MS, RUNNING_DEBOUNCE_MS};
use crate::game::GameState;
use crate::grid::Direction;

/// One-shot requests raised by presses outside of `Running`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Requests {
    /// Idle: leave the menu and start playing.
    pub start: bool,
    /// Idle: select the next difficulty.
    pub next_difficulty: bool,
    /// Idle: select the previous difficulty.
    pub prev_difficulty: bool,
    /// Won/Lost: play again at the same difficulty.
    pub restart: bool,
    /// Won/Lost: go back to the menu.
    pub to_idle: bool,
}

impl Requests {
    pub const fn is_empty(&self) -> bool {
        !(self.start || self.next_difficulty || self.prev_difficulty || self.restart || self.to_idle)
    }
}

/// What happened to a single press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PressOutcome {
    /// Inside the debounce window of the previous accepted press.
    Debounced,
    /// Direction admitted into the queue.
    Queued,
    /// Direction refused by the admission filter or a full queue.
    Rejected,
    /// Counted towards a won/lost gesture that is not complete yet.
    Counted,
    /// Raised a request for the next tick.
    Requested,
    /// No binding for this button in the current state.
    Ignored,
}

/// Debounce window applied to presses while the game is in `state`.
pub const fn debounce_window_ms(state: GameState) -> u64 {
    match state {
        GameState::Idle => IDLE_DEBOUNCE_MS,
        GameState::Running => RUNNING_DEBOUNCE_MS,
        GameState::Won | GameState::Lost => END_DEBOUNCE_MS,
    }
}

struct ControlState {
    queue: DirectionQueue,
    heading: Direction,
    state: GameState,
    requests: Requests,
    up_presses: u8,
    down_presses: u8,
    last_press_ms: Option<u64>,
}

impl ControlState {
    const fn new() -> Self {
        Self {
            queue: DirectionQueue::new(),
            heading: Direction::Right,
            state: GameState::Idle,
            requests: Requests {
                start: false,
                next_difficulty: false,
                prev_difficulty: false,
                restart: false,
                to_idle: false,
            },
            up_presses: 0,
            down_presses: 0,
            last_press_ms: None,
        }
    }

    fn press(
        &mut self,
        dir: Direction,
        now_ms: u64,
    ) -> PressOutcome {
        if let Some(last) = self.last_press_ms
            && now_ms.saturating_sub(last) < debounce_window_ms(self.state)
        {
            return PressOutcome::Debounced;
        }
        self.last_press_ms = Some(now_ms);

        match self.state {
            GameState::Idle => self.press_idle(dir),
            GameState::Running => self.press_running(dir),
            GameState::Won | GameState::Lost => self.press_end(dir),
        }
    }

    fn press_idle(
        &mut self,
        dir: Direction,
    ) -> PressOutcome {
        match dir {
            Direction::Up | Direction::Down => self.requests.start = true,
            Direction::Left => self.requests.prev_difficulty = true,
            Direction::Right => self.requests.next_difficulty = true,
            Direction::Empty => return PressOutcome::Ignored,
        }
        PressOutcome::Requested
    }

    fn press_running(
        &mut self,
        dir: Direction,
    ) -> PressOutcome {
        let last = self.queue.peek_last().unwrap_or_default();
        if admission::accept(dir, last, self.heading) && self.queue.push(dir) {
            PressOutcome::Queued
        } else {
            PressOutcome::Rejected
        }
    }

    fn press_end(
        &mut self,
        dir: Direction,
    ) -> PressOutcome {
        match dir {
            Direction::Up => {
                self.up_presses += 1;
                if self.up_presses >= GESTURE_PRESSES {
                    self.reset_gestures();
                    self.requests.restart = true;
                    return PressOutcome::Requested;
                }
                PressOutcome::Counted
            }
            Direction::Down => {
                self.down_presses += 1;
                if self.down_presses >= GESTURE_PRESSES {
                    self.reset_gestures();
                    self.requests.to_idle = true;
                    return PressOutcome::Requested;
                }
                PressOutcome::Counted
            }
            _ => PressOutcome::Ignored,
        }
    }

    fn reset_gestures(&mut self) {
        self.up_presses = 0;
        self.down_presses = 0;
    }
}

/// Input channel between the button context and the game tick.
pub struct Controls {
    inner: Mutex<CriticalSectionRawMutex, RefCell<ControlState>>,
}

impl Controls {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ControlState::new())),
        }
    }

    fn with<R>(
        &self,
        f: impl FnOnce(&mut ControlState) -> R,
    ) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    // -------------------------------------------------------------------------
    // Button context
    // -------------------------------------------------------------------------

    /// Handle one debounced-or-not edge from a button, timestamped in ms.
    pub fn on_button(
        &self,
        dir: Direction,
        now_ms: u64,
    ) -> PressOutcome {
        self.with(|s| s.press(dir, now_ms))
    }

    // -------------------------------------------------------------------------
    // Tick context
    // -------------------------------------------------------------------------

    /// Pop the next queued direction and make it the heading.
    /// An empty queue keeps the current heading.
    pub fn next_heading(&self) -> Direction {
        self.with(|s| {
            if let Some(dir) = s.queue.pop() {
                s.heading = dir;
            }
            s.heading
        })
    }

    /// Take every pending request, leaving none behind.
    pub fn take_requests(&self) -> Requests { self.with(|s| core::mem::take(&mut s.requests)) }

    /// Publish the game state that routes and debounces the next presses.
    ///
    /// Changing state drops stale requests and half-finished gestures.
    pub fn publish_state(
        &self,
        state: GameState,
    ) {
        self.with(|s| {
            if s.state != state {
                s.state = state;
                s.requests = Requests::default();
                s.reset_gestures();
            }
        });
    }

    /// Drop all queued directions and restart from `heading`.
    pub fn reset(
        &self,
        heading: Direction,
    ) {
        self.with(|s| {
            s.queue.clear();
            s.heading = heading;
        });
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    pub fn heading(&self) -> Direction { self.with(|s| s.heading) }

    pub fn queued(&self) -> usize { self.with(|s| s.queue.len()) }

    pub fn state(&self) -> GameState { self.with(|s| s.state) }

    /// Timestamp of the last press that passed the debounce window.
    pub fn last_press_ms(&self) -> Option<u64> { self.with(|s| s.last_press_ms) }
}

impl Default for Controls {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
