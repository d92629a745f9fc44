//! Hardware abstraction and peripheral initialization.
//!
//! This module defines the pin mappings and peripheral initialization
//! for the dice hardware.
//!
//! # Pin Assignments
//!
//! ## Pip LEDs (see [`crate::pips`])
//! - **PA0**: CENTER
//! - **PA1**: DIAGONAL
//! - **PA2**: ANTI_DIAGONAL
//! - **PA3**: MIDDLE
//!
//! ## Button
//! - **PA4**: BTN_N - Active-low push button to GND, internal pull-up, EXTI4
//!
//! ## Battery
//! - **ADC1 / VREFINT**: Internal reference measured against VDD
//!
//! ## Low Power & RTC
//! - **PC14**: OSC32_IN - 32.768 kHz crystal input
//! - **PC15**: OSC32_OUT - 32.768 kHz crystal output
//!
//! ## Debug (SWD)
//! - **PA13**: SWDIO
//! - **PA14**: SWCLK

use dice_core::{ButtonInput, PipDriver, PipOutput, Pips};
use embassy_stm32::Peripherals;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};

use crate::pips::PipLeds;
use crate::power::{BatterySensor, TickTimer};

/// Top-level peripheral container for the dice.
///
/// Owns every peripheral the dice core needs and implements the
/// [`dice_core::hal`] capabilities on top of them: pips and button here,
/// battery sampling, ticking and suspending in [`crate::power`].
pub struct Board {
    /// Pip LED outputs
    pub(crate) pips: PipLeds,
    /// Dice button, low while pressed
    pub(crate) button: ExtiInput<'static>,
    /// VREFINT measurement through ADC1, powered only while sampling
    pub(crate) battery: BatterySensor,
    /// 16 ms tick deadline
    pub(crate) tick: TickTimer,
}

impl Board {
    /// Initializes all peripherals from the STM32 peripheral singleton.
    ///
    /// # Initial GPIO States
    ///
    /// - PA0..PA3 (pips): Low (all LEDs off)
    /// - PA4 (BTN_N): Input with pull-up
    /// - ADC1: Off until the first battery sample
    ///
    /// The tick timer starts running, one period from now.
    ///
    /// # Arguments
    ///
    /// * `p` - STM32 peripheral singleton from embassy_stm32::init()
    pub fn new(p: Peripherals) -> Self {
        Self {
            pips: PipDriver::new(
                Output::new(p.PA0, Level::Low, Speed::Low),
                Output::new(p.PA1, Level::Low, Speed::Low),
                Output::new(p.PA2, Level::Low, Speed::Low),
                Output::new(p.PA3, Level::Low, Speed::Low),
            ),
            button: ExtiInput::new(p.PA4, p.EXTI4, Pull::Up),
            battery: BatterySensor::new(p.ADC1),
            tick: TickTimer::running(),
        }
    }
}

impl PipOutput for Board {
    fn show(&mut self, pips: Pips) {
        self.pips.show(pips);
    }
}

impl ButtonInput for Board {
    fn is_pressed(&mut self) -> bool {
        self.button.is_low()
    }
}
