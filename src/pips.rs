//! Pip LED outputs.
//!
//! Seven LEDs in the usual dice layout, wired as four groups. Each group is
//! driven directly by one GPIO through its own resistor, active high:
//!
//! - CENTER (PA0): the middle LED
//! - DIAGONAL (PA1): top-right and bottom-left
//! - ANTI_DIAGONAL (PA2): top-left and bottom-right
//! - MIDDLE (PA3): the two middle-row LEDs
//!
//! The face-to-group mapping lives in [`dice_core::display`].

use dice_core::PipDriver;
use embassy_stm32::gpio::Output;

/// The four pip group outputs, in `CENTER, DIAGONAL, ANTI_DIAGONAL, MIDDLE`
/// order.
pub type PipLeds = PipDriver<Output<'static>, Output<'static>, Output<'static>, Output<'static>>;
