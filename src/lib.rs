//! Snake matrix library - the testable core of the LED matrix firmware.
//!
//! Everything that does not touch hardware lives here so it can be tested on
//! the host machine. The binary (`main.rs`) wires this library to the RP2350
//! peripherals and the embassy executors.
//!
//! # Execution contexts
//!
//! | Context | Rate | Touches |
//! |---------|------|---------|
//! | Scan (interrupt executor) | `FRAME_RATE_HZ * COLS` | [`frame::FrameScanner`], [`scan::ScanDriver`] |
//! | Game tick (thread executor) | `GAME_RATE_HZ` | [`game::Game`], [`frame::FrameWriter`], [`input::Controls`] |
//! | Buttons (GPIO edge) | irregular | [`input::Controls`] |
//!
//! [`input::Controls`] is the only state written from more than one context and
//! is guarded by a critical section. The frame store hands out one writer half
//! and one scanner half that coordinate through a single pending-swap flag.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod frame;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod rng;
pub mod scan;

pub use game::{Difficulty, Game, GameState, TickReport};
pub use grid::{Direction, Position};
pub use input::Controls;
