//! Board configuration.
//!
//! - `matrix`: Matrix geometry, channel mapping and refresh rates
//! - `input`: Direction queue sizing, debounce windows and gesture length

pub mod input;
pub mod matrix;

// Re-export at config level for convenience
pub use input::{
    END_DEBOUNCE_MS,
    GESTURE_PRESSES,
    IDLE_DEBOUNCE_MS,
    QUEUE_CAPACITY,
    RUNNING_DEBOUNCE_MS,
};
pub use matrix::{
    CELLS,
    COLS,
    FRAME_RATE_HZ,
    GAME_RATE_HZ,
    INTENSITY_MASK,
    ROWS,
    SCAN_PERIOD_US,
    TICK_PERIOD_US,
    blue_channel,
    green_channel,
    red_channel,
};
