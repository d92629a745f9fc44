//! Power management for the battery-powered dice.
//!
//! This module provides the board side of the dice's power handling: the
//! battery measurement, the 16 ms tick and the low-power wait between loop
//! iterations.
//!
//! # Battery Measurement
//!
//! The dice runs straight off a coin cell with no regulator, so VDD is the
//! battery voltage. ADC1 converts the internal reference VREFINT with VDD as
//! full scale. At 8-bit resolution the reading is `255 * VREFINT / VDD`,
//! rising as the cell drains. The ADC is switched on for each sample and off
//! again right after it.
//!
//! # Sleep
//!
//! Between iterations the executor idles in STOP mode. While the dice is
//! busy it wakes on the next tick deadline (RTC alarm of the time driver) or
//! on a button edge (EXTI4). Once idle the tick deadline is dropped and only
//! the button can wake it.

use dice_core::time::TICK_MS;
use dice_core::{BatterySampler, LowPowerSuspend, TickSource};
use embassy_futures::select::select;
use embassy_stm32::adc::{self, Adc, Resolution, SampleTime};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::{Peri, bind_interrupts, pac};
use embassy_time::{Duration, Instant, Timer, block_for};

use crate::hardware::Board;

bind_interrupts!(struct Irqs {
    ADC1_COMP => adc::InterruptHandler<ADC1>;
});

/// Typical VREFINT voltage of the STM32L0 in millivolts.
pub const VREFINT_MV: u16 = 1224;

/// Period of the dice tick.
const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS as u64);

/// VREFINT startup time before its first conversion.
const VREFINT_SETTLE: Duration = Duration::from_micros(70);

/// Reads VREFINT against VDD.
///
/// The ADC and the VREFINT buffer are powered only for the duration of one
/// conversion, so neither draws current while the dice sleeps.
pub struct BatterySensor {
    adc: Peri<'static, ADC1>,
}

impl BatterySensor {
    /// Takes ownership of ADC1 without powering it.
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC1 peripheral
    pub fn new(adc: Peri<'static, ADC1>) -> Self {
        Self { adc }
    }

    /// Powers the ADC up, takes one 8-bit conversion and powers it down.
    pub async fn read(&mut self) -> u8 {
        let mut adc = Adc::new(self.adc.reborrow(), Irqs);
        adc.set_resolution(Resolution::BITS8);
        // VREFINT needs a long sampling window.
        adc.set_sample_time(SampleTime::CYCLES160_5);
        let mut vref = adc.enable_vref();
        block_for(VREFINT_SETTLE);

        let sample = adc.read(&mut vref).await as u8;

        // Dropping the driver disables the ADC and gates its clock, but
        // leaves the VREFINT buffer enabled.
        pac::ADC1.ccr().modify(|w| w.set_vrefen(false));
        drop(adc);

        sample
    }
}

/// Deadline-based periodic tick.
///
/// A tick is pending once the deadline has passed. Consuming it moves the
/// deadline one period on; pausing drops the deadline altogether.
pub struct TickTimer {
    deadline: Option<Instant>,
}

impl TickTimer {
    /// Creates a timer whose first tick is one period from now.
    pub fn running() -> Self {
        Self {
            deadline: Some(Instant::now() + TICK_PERIOD),
        }
    }

    fn is_pending(&self) -> bool {
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }

    fn take(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = Some(deadline + TICK_PERIOD);
                true
            }
            _ => false,
        }
    }
}

impl BatterySampler for Board {
    async fn sample(&mut self) -> u8 {
        let sample = self.battery.read().await;

        #[cfg(feature = "debug-mode")]
        defmt::info!("VREFINT sample: {}", sample);

        sample
    }
}

impl TickSource for Board {
    fn take_tick(&mut self) -> bool {
        self.tick.take()
    }

    fn is_pending(&self) -> bool {
        self.tick.is_pending()
    }

    fn pause(&mut self) {
        self.tick.deadline = None;
    }

    fn resume(&mut self) {
        self.tick = TickTimer::running();
    }

    fn is_paused(&self) -> bool {
        self.tick.deadline.is_none()
    }
}

impl LowPowerSuspend for Board {
    /// Waits for the tick deadline or a button edge.
    ///
    /// `Timer::at` completes immediately for a deadline already in the past.
    /// With the tick paused the button is still released (the dice only goes
    /// idle then), and `wait_for_low` arms EXTI before checking the level, so
    /// a press landing in between still wakes the dice.
    async fn suspend(&mut self) {
        match self.tick.deadline {
            Some(deadline) => {
                select(Timer::at(deadline), self.button.wait_for_any_edge()).await;
            }
            None => self.button.wait_for_low().await,
        }
    }
}
