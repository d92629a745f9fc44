//! Firmware for a tiny battery-powered electronic dice.
//!
//! # Overview
//!
//! Press the button and the dice spins through its faces, slows down, blinks
//! the result four times and holds it for two seconds before going dark:
//! - Seven pip LEDs driven as four groups
//! - One push button, which also wakes the dice
//! - A coin cell, checked on every wake-up with a low-battery blink
//! - Ultra-low power operation using STM32L031G6 in STOP mode
//!
//! # Hardware
//!
//! - **MCU**: STM32L031G6U6 (Cortex-M0+, ultra-low-power)
//! - **Battery**: 1x CR2032 coin cell, no regulator
//! - **LEDs**: 7 pips in four groups
//! - **RTC**: 32.768 kHz crystal for timekeeping in STOP mode
//!
//! # Low Power Operation
//!
//! - MSI oscillator at 66 kHz for minimal active current
//! - Embassy executor automatically enters STOP mode when idle
//! - A 16 ms tick runs only while the dice is animating or debouncing
//! - The button EXTI wakes the dice from its idle sleep
//!
//! The watchdog is never started, so every reset, brown-out or not, starts
//! the dice from its default state.
//!
//! # Module Organization
//!
//! - [`hardware`] - Pin mappings and peripheral initialization
//! - [`pips`] - Pip LED outputs
//! - [`power`] - Battery measurement, tick and sleep
//!
//! The dice logic itself lives in the `dice-core` crate.

#![no_std]
#![no_main]

mod hardware;
mod pips;
mod power;

use dice_core::battery::{self, LOW_BATTERY_MV};
use dice_core::{Dice, Runner};
use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    rcc::{LsConfig, LseConfig, mux::ClockMux},
    time::Hertz,
};
use {defmt_rtt as _, panic_probe as _};

use hardware::Board;
use power::VREFINT_MV;

/// ADC reading above which the battery counts as low.
const BATTERY_THRESHOLD: u8 = battery::threshold(VREFINT_MV, LOW_BATTERY_MV);

/// Creates a low-power clock configuration for STM32L031.
///
/// # Clock Settings
///
/// - **MSI**: 66 kHz in normal mode, 2.097 MHz in debug mode (for reliable debugging)
/// - **System clock**: MSI (no PLL)
/// - **LSE**: 32.768 kHz external crystal for RTC
/// - **Voltage scale**: Range 1 (1.8V core for low power)
///
/// In debug mode, uses higher clock speed to keep debug connection alive.
///
/// # Returns
///
/// Configured RCC settings for embassy-stm32 initialization
fn create_low_power_config() -> embassy_stm32::rcc::Config {
    embassy_stm32::rcc::Config {
        #[cfg(feature = "debug-mode")]
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE2M),
        #[cfg(not(feature = "debug-mode"))]
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE66K),
        hsi: false,
        hse: None,
        pll: None,
        sys: embassy_stm32::rcc::Sysclk::MSI,
        ahb_pre: embassy_stm32::rcc::AHBPrescaler::DIV1,
        apb1_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        apb2_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        ls: LsConfig {
            rtc: embassy_stm32::rcc::RtcClockSource::LSE,
            lsi: false,
            lse: Some(LseConfig {
                frequency: Hertz::hz(32768),
                mode: embassy_stm32::rcc::LseMode::Oscillator(embassy_stm32::rcc::LseDrive::Low),
            }),
        },
        voltage_scale: embassy_stm32::rcc::VoltageScale::RANGE1,
        mux: ClockMux::default(),
    }
}

/// Main entry point for the dice firmware.
///
/// # Initialization Sequence
///
/// 1. Configure clocks for low power operation (66 kHz MSI)
/// 2. Initialize STM32 peripherals
/// 3. Initialize pips, button, ADC and tick
/// 4. Warm up the random generator from a first battery sample
/// 5. Enter the dice loop
///
/// # Main Loop
///
/// Each pass runs one iteration of the dice and then sleeps until the next
/// tick or button edge, or only until the next button press once the dice is
/// idle.
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_low_power_config();

    let p = embassy_stm32::init(config);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Dice firmware starting...");

    // Wait 3 seconds after boot to allow debugger connection
    // before entering STOP mode.
    #[cfg(feature = "debug-mode")]
    {
        defmt::info!("Waiting 3 seconds for debugger connection...");
        embassy_time::Timer::after_secs(3).await;
    }

    #[cfg(feature = "debug-mode")]
    defmt::info!("Initializing peripherals...");

    let board = Board::new(p);
    let mut runner = Runner::start(board, Dice::new(BATTERY_THRESHOLD)).await;

    #[cfg(feature = "debug-mode")]
    defmt::info!("Entering dice loop, battery threshold {}", BATTERY_THRESHOLD);

    loop {
        #[cfg(not(feature = "debug-mode"))]
        runner.step().await;

        #[cfg(feature = "debug-mode")]
        if runner.step().await == dice_core::Power::DeepSleep {
            defmt::info!("Woke from idle, tick {}", runner.dice().now());
        }
    }
}
