//! Button tasks, one per direction.
//!
//! Each press is a falling edge (active low with pull-up). Debouncing and
//! routing happen in [`Controls`], which knows the current game state.

use defmt::debug;
use embassy_rp::gpio::Input;
use embassy_time::Instant;
use snake_matrix::{Controls, Direction};

#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(
    mut button: Input<'static>,
    direction: Direction,
    controls: &'static Controls,
) {
    loop {
        button.wait_for_falling_edge().await;
        let outcome = controls.on_button(direction, Instant::now().as_millis());
        debug!("Button {}: {}", direction, outcome);
    }
}
