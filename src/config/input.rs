//! Button input configuration.

/// Pending directions buffered between two movement ticks.
pub const QUEUE_CAPACITY: usize = 5;

/// Minimum time between accepted presses on the idle screen.
/// Wide, the idle screen only reacts to deliberate presses.
pub const IDLE_DEBOUNCE_MS: u64 = 250;

/// Minimum time between accepted presses on the won/lost screens.
pub const END_DEBOUNCE_MS: u64 = 100;

/// Minimum time between accepted presses while the snake is moving.
/// Kept tight so quick turns still register; bounce repeats are
/// rejected by the admission filter anyway.
pub const RUNNING_DEBOUNCE_MS: u64 = 20;

/// Presses of the same button needed to confirm a restart / back-to-idle
/// gesture on the won/lost screens.
pub const GESTURE_PRESSES: u8 = 2;
