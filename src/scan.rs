//! Column multiplexing.
//!
//! One [`ScanDriver::step`] per scan period lights the next column: all
//! columns are switched off, the frame store gets its chance to swap at the
//! column-0 boundary, the column's pixels are loaded into the LED driver and
//! latched, then the column is selected and switched back on.
//!
//! The hardware sits behind [`LedDriver`] and [`ColumnSelect`]; the firmware
//! implements them for the TLC5947 and the 74HCT154, tests use mocks.

use crate::config::{COLS, INTENSITY_MASK, ROWS, blue_channel, green_channel, red_channel};
use crate::frame::FrameScanner;

/// Grayscale channels per TLC5947.
pub const CHANNELS: usize = 24;
/// Bits per grayscale channel.
const BITS_PER_CHANNEL: usize = 12;
/// Shift register length of one TLC5947 in bytes.
pub const FRAME_BYTES: usize = CHANNELS * BITS_PER_CHANNEL / 8;

const _: () = assert!(3 * ROWS <= CHANNELS, "one RGB row needs three channels");

// =============================================================================
// Collaborator traits
// =============================================================================

/// PWM LED driver holding one 12-bit intensity per channel.
pub trait LedDriver {
    type Error;

    /// Buffer `value` (masked to 12 bits) for `channel`. Out-of-range channels
    /// are ignored.
    fn set_channel(
        &mut self,
        channel: usize,
        value: u16,
    );

    /// Shift the buffered channels out. With `latch`, outputs are blanked
    /// around the latch pulse so no mixed column is ever visible.
    fn update(
        &mut self,
        latch: bool,
    ) -> Result<(), Self::Error>;
}

/// Column address decoder with a common output enable.
pub trait ColumnSelect {
    fn disable_all(&mut self);

    fn select(
        &mut self,
        column: usize,
    );

    fn enable(&mut self);
}

// =============================================================================
// Channel buffer
// =============================================================================

/// Grayscale values of one TLC5947 and their wire encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelBuffer {
    values: [u16; CHANNELS],
}

impl ChannelBuffer {
    pub const fn new() -> Self {
        Self {
            values: [0; CHANNELS],
        }
    }

    #[inline]
    pub fn set(
        &mut self,
        channel: usize,
        value: u16,
    ) {
        if let Some(slot) = self.values.get_mut(channel) {
            *slot = value & INTENSITY_MASK;
        }
    }

    pub fn get(
        &self,
        channel: usize,
    ) -> Option<u16> {
        self.values.get(channel).copied()
    }

    pub fn fill(
        &mut self,
        value: u16,
    ) {
        self.values.fill(value & INTENSITY_MASK);
    }

    /// Shift register image: channel 23 first, 12 bits each, MSB first.
    pub fn pack(&self) -> [u8; FRAME_BYTES] {
        let mut out = [0u8; FRAME_BYTES];
        let mut bit = 0;
        for &value in self.values.iter().rev() {
            for b in (0..BITS_PER_CHANNEL).rev() {
                if value & (1 << b) != 0 {
                    out[bit / 8] |= 0x80 >> (bit % 8);
                }
                bit += 1;
            }
        }
        out
    }
}

impl Default for ChannelBuffer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Scan driver
// =============================================================================

/// Result of one scan step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct ScanStep {
    /// Column that is now lit.
    pub column: usize,
    /// A new frame became visible with this column.
    pub swapped: bool,
}

pub struct ScanDriver<L, C> {
    leds: L,
    columns: C,
    column: usize,
}

impl<L: LedDriver, C: ColumnSelect> ScanDriver<L, C> {
    /// The first step lights column 0.
    pub fn new(
        leds: L,
        columns: C,
    ) -> Self {
        Self {
            leds,
            columns,
            column: COLS - 1,
        }
    }

    /// Column lit by the last step.
    pub fn column(&self) -> usize { self.column }

    /// Advance to and light the next column.
    ///
    /// On a driver error the columns stay disabled until the next step.
    pub fn step(
        &mut self,
        scanner: &mut FrameScanner<'_>,
    ) -> Result<ScanStep, L::Error> {
        self.columns.disable_all();
        self.column = (self.column + 1) % COLS;

        let swapped = scanner.maybe_swap_at_boundary(self.column);
        for (row, px) in scanner.column(self.column).iter().enumerate() {
            self.leds.set_channel(red_channel(row), px.r);
            self.leds.set_channel(green_channel(row), px.g);
            self.leds.set_channel(blue_channel(row), px.b);
        }
        self.leds.update(true)?;

        self.columns.select(self.column);
        self.columns.enable();
        Ok(ScanStep {
            column: self.column,
            swapped,
        })
    }

    /// Switch every column off.
    pub fn blank(&mut self) { self.columns.disable_all(); }

    pub fn leds(&self) -> &L { &self.leds }

    pub fn columns(&self) -> &C { &self.columns }
}

// =============================================================================
// Unit Tests
// =============================================================================
