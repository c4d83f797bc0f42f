//! Hardware drivers for the LED matrix.
//!
//! - `tlc5947`: 24-channel PWM driver feeding the 8 RGB rows
//! - `hct154`: column decoder selecting one of the 16 columns

mod hct154;
mod tlc5947;

pub use hct154::Hct154;
pub use tlc5947::{Error as Tlc5947Error, Tlc5947, tlc5947_spi_config};
