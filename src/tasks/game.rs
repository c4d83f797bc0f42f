//! Game tick task.
//!
//! Advances the game once per `TICK_PERIOD_US`, draws into the frame store's
//! back grid and logs what the tick reported.

use defmt::{debug, info};
use embassy_time::{Duration, Instant, Ticker};
use snake_matrix::config::{GAME_RATE_HZ, TICK_PERIOD_US};
use snake_matrix::frame::FrameWriter;
use snake_matrix::rng::XorShift32;
use snake_matrix::{Controls, Game, TickReport};

use super::SCAN_ERRORS;

/// Ticks between two statistics lines (10 s).
const STATS_INTERVAL_TICKS: u32 = GAME_RATE_HZ as u32 * 10;

#[embassy_executor::task]
pub async fn game_task(
    mut writer: FrameWriter<'static>,
    controls: &'static Controls,
) {
    info!("Game task started: {} Hz", GAME_RATE_HZ);

    let mut game = Game::new();
    let mut rng = XorShift32::new(Instant::now().as_ticks() as u32);
    let mut ticker = Ticker::every(Duration::from_micros(TICK_PERIOD_US));
    let mut ticks = 0u32;

    loop {
        let report = game.tick(controls, &mut rng, &mut writer);

        if report.started() {
            // Press timing is the only entropy on the board.
            let press_ms = controls.last_press_ms().unwrap_or_default();
            rng.reseed((press_ms as u32) ^ (Instant::now().as_ticks() as u32));
        }
        log_report(&game, &report);

        ticks = ticks.wrapping_add(1);
        if ticks % STATS_INTERVAL_TICKS == 0 {
            let stats = writer.stats();
            info!(
                "Frames: {} scanned, {} swapped, {} dropped; {} scan errors",
                stats.scans,
                stats.swaps,
                stats.dropped,
                SCAN_ERRORS.load(core::sync::atomic::Ordering::Relaxed)
            );
        }

        ticker.next().await;
    }
}

fn log_report(
    game: &Game,
    report: &TickReport,
) {
    if let Some((from, to)) = report.transition {
        info!("State {} -> {} ({}, length {})", from, to, game.difficulty(), game.snake().len());
    }
    if let Some(difficulty) = report.difficulty {
        info!("Difficulty: {}", difficulty);
    }
    if let Some(kind) = report.eaten {
        debug!("Ate {} fruit, length {}, pending {}", kind, game.snake().len(), game.pending_len());
    }
    if report.spawned > 0 || report.expired.normal > 0 || report.expired.hazard > 0 {
        debug!("Fruits: {} spawned, {} expired", report.spawned, report.expired);
    }
    if report.frame_dropped {
        debug!("Frame dropped: previous swap still pending");
    }
}
