//! 74HCT154 4-to-16 column decoder.
//!
//! Wiring (Pico 2): A0..A3 on GPIO10..GPIO13, the tied-together active-low
//! enables (E1/E2) on GPIO14.

use embassy_rp::gpio::{Level, Output};
use snake_matrix::scan::ColumnSelect;

pub struct Hct154<'d> {
    address: [Output<'d>; 4],
    enable_n: Output<'d>,
}

impl<'d> Hct154<'d> {
    /// Starts with every column disabled.
    pub fn new(
        address: [Output<'d>; 4],
        mut enable_n: Output<'d>,
    ) -> Self {
        enable_n.set_high();
        Self { address, enable_n }
    }
}

impl ColumnSelect for Hct154<'_> {
    #[inline]
    fn disable_all(&mut self) { self.enable_n.set_high(); }

    fn select(
        &mut self,
        column: usize,
    ) {
        for (bit, pin) in self.address.iter_mut().enumerate() {
            pin.set_level(Level::from((column >> bit) & 1 == 1));
        }
    }

    #[inline]
    fn enable(&mut self) { self.enable_n.set_low(); }
}
