//! TLC5947 24-channel 12-bit PWM LED driver over blocking SPI.
//!
//! Wiring (Pico 2):
//! - SIN: GPIO19 (SPI0 TX)
//! - SCLK: GPIO18 (SPI0 CLK)
//! - XLAT: GPIO17
//! - BLANK: GPIO16 (high = all outputs off)
//!
//! The chip has no chip select; every transfer shifts the whole 288-bit
//! register and XLAT copies it to the outputs.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use snake_matrix::scan::{ChannelBuffer, LedDriver};

/// SCLK frequency. The chip allows up to 30 MHz; the panel cable does not.
const SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// XLAT high time in CPU cycles (1 us at 150 MHz; datasheet minimum is 30 ns).
const XLAT_PULSE_CYCLES: u32 = 150;

/// SPI configuration for the TLC5947 (mode 0, MSB first).
pub fn tlc5947_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = SPI_FREQUENCY_HZ;
    config
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    Spi(embassy_rp::spi::Error),
}

pub struct Tlc5947<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    xlat: Output<'d>,
    blank: Output<'d>,
    channels: ChannelBuffer,
}

impl<'d> Tlc5947<'d> {
    /// Takes BLANK high and XLAT low so nothing lights before [`init`](Self::init).
    pub fn new(
        spi: Spi<'d, SPI0, Blocking>,
        mut xlat: Output<'d>,
        mut blank: Output<'d>,
    ) -> Self {
        xlat.set_low();
        blank.set_high();
        Self {
            spi,
            xlat,
            blank,
            channels: ChannelBuffer::new(),
        }
    }

    /// Latch an all-zero frame and enable the outputs.
    pub fn init(&mut self) -> Result<(), Error> {
        self.channels.fill(0);
        self.update(true)
    }

    fn pulse_xlat(&mut self) {
        self.xlat.set_high();
        cortex_m::asm::delay(XLAT_PULSE_CYCLES);
        self.xlat.set_low();
    }
}

impl LedDriver for Tlc5947<'_> {
    type Error = Error;

    #[inline]
    fn set_channel(
        &mut self,
        channel: usize,
        value: u16,
    ) {
        self.channels.set(channel, value);
    }

    fn update(
        &mut self,
        latch: bool,
    ) -> Result<(), Error> {
        let frame = self.channels.pack();
        self.spi.blocking_write(&frame).map_err(Error::Spi)?;

        if latch {
            // BLANK high, XLAT pulse, BLANK low: the new values appear at once.
            self.blank.set_high();
            self.pulse_xlat();
            self.blank.set_low();
        } else {
            self.pulse_xlat();
        }
        Ok(())
    }
}
