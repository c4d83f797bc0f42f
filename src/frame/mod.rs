//! Frame storage between the game tick and the column scan.
//!
//! - `color`: 12-bit pixel type
//! - `store`: Double buffer with the boundary-synchronised swap
//! - `canvas`: embedded-graphics `DrawTarget` over a grid

mod canvas;
mod color;
mod store;

pub use canvas::Canvas;
pub use color::Rgb12;
pub use store::{BLANK_GRID, FrameScanner, FrameStats, FrameStore, FrameWriter, Grid};
