//! Embassy tasks for the matrix firmware.
//!
//! - `scan`: Column multiplex (interrupt executor, highest priority)
//! - `game`: Fixed-rate game tick and rendering (thread executor)
//! - `buttons`: Edge-triggered direction buttons (thread executor)

pub mod buttons;
pub mod game;
pub mod scan;

pub use buttons::button_task;
pub use game::game_task;
pub use scan::{SCAN_ERRORS, scan_task};
