//! Matrix geometry and refresh timing.
//!
//! The panel is 8 RGB rows driven by a single TLC5947 (24 channels) and
//! 16 columns selected one at a time through a 74HCT154 decoder.
//!
//! # Timing
//!
//! Periods are computed at compile time so the timer setup in the binary never
//! does the arithmetic itself.

// =============================================================================
// Geometry
// =============================================================================

/// Number of LED rows (one RGB triple per row on the TLC5947).
pub const ROWS: usize = 8;

/// Number of multiplexed columns.
pub const COLS: usize = 16;

/// Number of cells on the playfield. Upper bound for the snake and fruit slots.
pub const CELLS: usize = ROWS * COLS;

/// TLC5947 intensities are 12 bit.
pub const INTENSITY_MASK: u16 = 0x0FFF;

// =============================================================================
// Refresh Rates
// =============================================================================

/// Full-matrix refresh rate (every column lit once per frame).
pub const FRAME_RATE_HZ: u64 = 50;

/// Game logic rate. Difficulty periods are counted in these ticks.
pub const GAME_RATE_HZ: u64 = 20;

/// Dwell time of one column, in microseconds.
pub const SCAN_PERIOD_US: u64 = 1_000_000 / (FRAME_RATE_HZ * COLS as u64);

/// Period of the game tick, in microseconds.
pub const TICK_PERIOD_US: u64 = 1_000_000 / GAME_RATE_HZ;

// =============================================================================
// Channel Mapping
// =============================================================================
// G: 0, 3, 6, ... 21
// R: 1, 4, 7, ... 22
// B: 2, 5, 8, ... 23

/// TLC5947 channel driving the red LED of `row`.
#[inline]
pub const fn red_channel(row: usize) -> usize { (row % ROWS) * 3 + 1 }

/// TLC5947 channel driving the green LED of `row`.
#[inline]
pub const fn green_channel(row: usize) -> usize { (row % ROWS) * 3 }

/// TLC5947 channel driving the blue LED of `row`.
#[inline]
pub const fn blue_channel(row: usize) -> usize { (row % ROWS) * 3 + 2 }
