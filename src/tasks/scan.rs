//! Column scan task.
//!
//! Runs on the high-priority interrupt executor so the multiplex keeps its
//! cadence while the game tick draws. Lights one column per tick of
//! `SCAN_PERIOD_US`; a full pass over all columns is one displayed frame.

use core::sync::atomic::{AtomicU32, Ordering};

use defmt::{info, warn};
use embassy_time::{Duration, Ticker};
use snake_matrix::config::{COLS, SCAN_PERIOD_US};
use snake_matrix::frame::FrameScanner;
use snake_matrix::scan::ScanDriver;

use crate::drivers::{Hct154, Tlc5947};

/// Failed LED driver updates since boot.
pub static SCAN_ERRORS: AtomicU32 = AtomicU32::new(0);

pub type MatrixScan = ScanDriver<Tlc5947<'static>, Hct154<'static>>;

#[embassy_executor::task]
pub async fn scan_task(
    mut driver: MatrixScan,
    mut scanner: FrameScanner<'static>,
) {
    info!("Scan task started: {} columns, {} us per column", COLS, SCAN_PERIOD_US);

    let mut ticker = Ticker::every(Duration::from_micros(SCAN_PERIOD_US));
    loop {
        if let Err(e) = driver.step(&mut scanner) {
            let errors = SCAN_ERRORS.fetch_add(1, Ordering::Relaxed) + 1;
            // Log the 1st, 2nd, 4th, 8th... failure to keep the RTT buffer usable.
            if errors.is_power_of_two() {
                warn!("LED driver update failed ({} total): {}", errors, e);
            }
        }
        ticker.next().await;
    }
}
