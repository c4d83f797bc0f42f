//! Double-buffered frame store with a scan-synchronised swap.
//!
//! # Protocol
//!
//! The store is split once into a [`FrameWriter`] (game tick) and a
//! [`FrameScanner`] (column scan). They share two grids, a `front` index
//! (the grid being scanned) and a `swap_pending` flag:
//!
//! 1. The writer only touches the back grid, and only while `swap_pending`
//!    is false. When the frame is complete it sets `swap_pending` (Release).
//! 2. The scanner exchanges `front` only at column 0 and only when it sees
//!    `swap_pending` (Acquire), then clears the flag (Release).
//!
//! So the grid being written is never the grid being scanned, and a frame
//! requested mid-scan is shown from the next column-0 boundary on. Only the
//! scanner ever changes `front`.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use super::canvas::Canvas;
use super::color::Rgb12;
use crate::config::{COLS, ROWS};

/// One full matrix of pixels, indexed `[row][col]`.
pub type Grid = [[Rgb12; COLS]; ROWS];

/// All LEDs off.
pub const BLANK_GRID: Grid = [[Rgb12::BLACK; COLS]; ROWS];

/// Counters for the debug log.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct FrameStats {
    /// Completed scan passes (column-0 boundaries reached).
    pub scans: u32,
    /// Swaps applied at a boundary.
    pub swaps: u32,
    /// Frames the writer skipped because the previous one was still pending.
    pub dropped: u32,
}

/// Two grids, a cleared baseline and the pending-swap flag.
pub struct FrameStore {
    grids: [UnsafeCell<Grid>; 2],
    baseline: Grid,
    front: AtomicUsize,
    swap_pending: AtomicBool,
    scans: AtomicU32,
    swaps: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: the grids are only reached through the single FrameWriter and the
// single FrameScanner handed out by `split`, which never access the same grid
// at the same time (see module docs). Everything else is atomic.
unsafe impl Sync for FrameStore {}

impl FrameStore {
    /// Store with both grids and the baseline cleared.
    pub const fn new() -> Self { Self::with_baseline(BLANK_GRID) }

    /// Store whose grids start as (and clear back to) `baseline`.
    pub const fn with_baseline(baseline: Grid) -> Self {
        Self {
            grids: [UnsafeCell::new(baseline), UnsafeCell::new(baseline)],
            baseline,
            front: AtomicUsize::new(0),
            swap_pending: AtomicBool::new(false),
            scans: AtomicU32::new(0),
            swaps: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Hand out the writer and scanner halves.
    ///
    /// Taking `&mut self` guarantees there is exactly one of each.
    pub fn split(&mut self) -> (FrameWriter<'_>, FrameScanner<'_>) {
        let store: &Self = self;
        (FrameWriter { store }, FrameScanner { store })
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            scans: self.scans.load(Ordering::Relaxed),
            swaps: self.swaps.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }

    #[inline]
    fn swap_pending(&self) -> bool { self.swap_pending.load(Ordering::Acquire) }
}

impl Default for FrameStore {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Writer (game tick)
// =============================================================================

/// Game-side half: draws into the back grid and requests swaps.
pub struct FrameWriter<'a> {
    store: &'a FrameStore,
}

impl FrameWriter<'_> {
    /// True while the last finished frame waits for the next column-0 boundary.
    pub fn is_swap_pending(&self) -> bool { self.store.swap_pending() }

    pub fn stats(&self) -> FrameStats { self.store.stats() }

    /// The grid not being scanned. `None` while a swap is pending, because the
    /// back grid is then already queued for display.
    pub fn draw_grid(&mut self) -> Option<&mut Grid> {
        if self.store.swap_pending() {
            return None;
        }
        let back = 1 - self.store.front.load(Ordering::Acquire);
        // SAFETY: no swap is pending, so the scanner will not change `front`
        // and never reads the back grid. The returned borrow holds `&mut self`,
        // so `request_swap` cannot run until it ends.
        Some(unsafe { &mut *self.store.grids[back].get() })
    }

    /// Copy the baseline into the draw grid.
    ///
    /// Returns false (and changes nothing) while a swap is pending.
    pub fn clear(&mut self) -> bool {
        let baseline = self.store.baseline;
        match self.draw_grid() {
            Some(grid) => {
                *grid = baseline;
                true
            }
            None => false,
        }
    }

    /// Ask the scanner to show the draw grid from the next frame boundary on.
    pub fn request_swap(&mut self) { self.store.swap_pending.store(true, Ordering::Release); }

    /// Clear, draw with `f`, then request the swap.
    ///
    /// When the previous frame has not been shown yet nothing is drawn, the
    /// frame is counted as dropped and `None` is returned.
    pub fn draw<R>(
        &mut self,
        f: impl FnOnce(&mut Canvas<'_>) -> R,
    ) -> Option<R> {
        let store = self.store;
        let Some(grid) = self.draw_grid() else {
            store.dropped.fetch_add(1, Ordering::Relaxed);
            return None;
        };
        *grid = store.baseline;
        let result = f(&mut Canvas::new(grid));
        self.request_swap();
        Some(result)
    }
}

// =============================================================================
// Scanner (column multiplex)
// =============================================================================

/// Scan-side half: reads the front grid and performs the boundary swap.
pub struct FrameScanner<'a> {
    store: &'a FrameStore,
}

impl FrameScanner<'_> {
    /// Exchange draw/display grids if `column` starts a new pass and a swap is
    /// pending. Returns whether a swap happened.
    pub fn maybe_swap_at_boundary(
        &mut self,
        column: usize,
    ) -> bool {
        if column != 0 {
            return false;
        }
        self.store.scans.fetch_add(1, Ordering::Relaxed);
        if !self.store.swap_pending() {
            return false;
        }
        let front = self.store.front.load(Ordering::Relaxed);
        self.store.front.store(1 - front, Ordering::Relaxed);
        self.store.swap_pending.store(false, Ordering::Release);
        self.store.swaps.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// The grid currently on the matrix.
    pub fn display_grid(&self) -> &Grid {
        let front = self.store.front.load(Ordering::Relaxed);
        // SAFETY: only this scanner changes `front`, and it needs `&mut self`
        // to do so, so the grid cannot become the writer's while borrowed.
        unsafe { &*self.store.grids[front].get() }
    }

    /// Pixels of one display column, top row first.
    pub fn column(
        &self,
        column: usize,
    ) -> [Rgb12; ROWS] {
        let grid = self.display_grid();
        let col = column % COLS;
        core::array::from_fn(|row| grid[row][col])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
