//! 12-bit RGB pixel as stored in the frame grids.
//!
//! Drawing code works in `Rgb888` (embedded-graphics); pixels are widened to
//! the TLC5947's 12-bit range when they land in a grid.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::config::INTENSITY_MASK;

/// One LED's channel intensities, each `0..=4095`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Rgb12 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb12 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a pixel, masking every channel to 12 bits.
    pub const fn new(
        r: u16,
        g: u16,
        b: u16,
    ) -> Self {
        Self {
            r: r & INTENSITY_MASK,
            g: g & INTENSITY_MASK,
            b: b & INTENSITY_MASK,
        }
    }

    /// Widen an 8-bit channel so that 0xFF maps to 0xFFF.
    #[inline]
    const fn widen(v: u8) -> u16 { ((v as u16) << 4) | ((v as u16) >> 4) }

    pub const fn is_off(self) -> bool { self.r == 0 && self.g == 0 && self.b == 0 }
}

impl From<Rgb888> for Rgb12 {
    fn from(c: Rgb888) -> Self {
        Self {
            r: Self::widen(c.r()),
            g: Self::widen(c.g()),
            b: Self::widen(c.b()),
        }
    }
}
