//! Button input path: admission filter, direction queue and the shared
//! [`Controls`] object the button and tick contexts meet in.
//!
//! - `queue`: Ring buffer of pending directions (drop-newest when full)
//! - `admission`: Rejects reversals and repeats before they reach the queue
//! - `controls`: Critical-section guarded state shared by both contexts

pub mod admission;
mod controls;
mod queue;

pub use controls::{Controls, PressOutcome, Requests, debounce_window_ms};
pub use queue::DirectionQueue;
