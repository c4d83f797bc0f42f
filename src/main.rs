//! Snake firmware for an 8x16 RGB LED matrix on Raspberry Pi Pico 2 (RP2350).
//!
//! # Architecture
//!
//! Three execution contexts share two objects:
//! - Scan task (interrupt executor, `SWI_IRQ_1`): lights one column every
//!   `SCAN_PERIOD_US` and swaps frames at column 0
//! - Game task (thread executor): one game tick every `TICK_PERIOD_US`, draws
//!   into the back grid and requests a swap
//! - Button tasks (thread executor): one per direction, feed [`Controls`]
//!
//! The frame store is split into a writer (game) and a scanner (scan);
//! `Controls` is the only state written from more than one task.
//!
//! # Pins
//!
//! | Function | GPIO |
//! |----------|------|
//! | TLC5947 SCLK / SIN | 18 / 19 (SPI0) |
//! | TLC5947 XLAT / BLANK | 17 / 16 |
//! | 74HCT154 A0..A3 | 10..13 |
//! | 74HCT154 /EN | 14 |
//! | Buttons Up / Down / Left / Right | 2 / 3 / 4 / 5 |
//!
//! # Button Controls
//!
//! - **Idle**: Left/Right change difficulty, Up or Down starts
//! - **Running**: steer the snake
//! - **Won/Lost**: Up twice plays again, Down twice returns to the menu

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the firmware (not testable on host)
#[cfg(target_arch = "arm")]
mod drivers;
#[cfg(target_arch = "arm")]
mod tasks;

#[cfg(target_arch = "arm")]
use defmt::info;
#[cfg(target_arch = "arm")]
use embassy_executor::{InterruptExecutor, Spawner};
#[cfg(target_arch = "arm")]
use embassy_rp::gpio::{Input, Level, Output, Pull};
#[cfg(target_arch = "arm")]
use embassy_rp::interrupt;
#[cfg(target_arch = "arm")]
use embassy_rp::interrupt::{InterruptExt, Priority};
#[cfg(target_arch = "arm")]
use embassy_rp::spi::Spi;
#[cfg(target_arch = "arm")]
use snake_matrix::frame::FrameStore;
#[cfg(target_arch = "arm")]
use snake_matrix::scan::ScanDriver;
#[cfg(target_arch = "arm")]
use snake_matrix::{Controls, Direction};
#[cfg(target_arch = "arm")]
use static_cell::StaticCell;
#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_arch = "arm")]
use crate::drivers::{Hct154, Tlc5947, tlc5947_spi_config};
#[cfg(target_arch = "arm")]
use crate::tasks::{button_task, game_task, scan_task};

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"snake-matrix"),
    embassy_rp::binary_info::rp_program_description!(c"Snake on an 8x16 RGB LED matrix (TLC5947 + 74HCT154)"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Button and game state shared between the button tasks and the game tick.
#[cfg(target_arch = "arm")]
static CONTROLS: Controls = Controls::new();

/// High-priority executor for the column scan.
#[cfg(target_arch = "arm")]
static SCAN_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[cfg(target_arch = "arm")]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is reserved for the scan executor and only pended by it.
    unsafe { SCAN_EXECUTOR.on_interrupt() }
}

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Snake matrix starting...");

    let p = embassy_rp::init(Default::default());

    // Columns off before the LED driver comes up
    let columns = Hct154::new(
        [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
        ],
        Output::new(p.PIN_14, Level::High),
    );

    // TLC5947 (TX-only, the chip has no data out that we use)
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, tlc5947_spi_config());
    let mut leds = Tlc5947::new(spi, Output::new(p.PIN_17, Level::Low), Output::new(p.PIN_16, Level::High));
    leds.init().unwrap();
    info!("TLC5947 initialized");

    // Frame store lives for the whole program; split once into its two halves
    static FRAMES: StaticCell<FrameStore> = StaticCell::new();
    let (writer, scanner) = FRAMES.init(FrameStore::new()).split();

    // Scan task on the interrupt executor so it preempts the game tick
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let scan_spawner = SCAN_EXECUTOR.start(interrupt::SWI_IRQ_1);
    scan_spawner.spawn(scan_task(ScanDriver::new(leds, columns), scanner)).unwrap();
    info!("Scan task spawned");

    spawner.spawn(game_task(writer, &CONTROLS)).unwrap();
    info!("Game task spawned");

    // Buttons (active-low with internal pull-up)
    spawner.spawn(button_task(Input::new(p.PIN_2, Pull::Up), Direction::Up, &CONTROLS)).unwrap();
    spawner.spawn(button_task(Input::new(p.PIN_3, Pull::Up), Direction::Down, &CONTROLS)).unwrap();
    spawner.spawn(button_task(Input::new(p.PIN_4, Pull::Up), Direction::Left, &CONTROLS)).unwrap();
    spawner.spawn(button_task(Input::new(p.PIN_5, Pull::Up), Direction::Right, &CONTROLS)).unwrap();
    info!("Buttons initialized!");
}

/// Host builds only carry the library; the firmware needs the RP2350 target.
#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("snake-matrix is firmware: build it with --target thumbv8m.main-none-eabihf");
    eprintln!("run the library tests on the host with: cargo test --lib");
}
