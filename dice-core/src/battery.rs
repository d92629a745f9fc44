//! Battery monitoring.
//!
//! # Measurement
//!
//! The supply voltage is never measured directly. The ADC converts a fixed
//! internal reference using the supply as its full scale, so the 8-bit result
//! is `255 * reference / supply`: the emptier the battery, the higher the
//! reading.
//!
//! # Warning
//!
//! A reading above the threshold blinks the centre pip three times, then the
//! dice carries on as normal. The battery is checked again every time the
//! dice falls into deep sleep, so the next wake-up warns again if the supply
//! is still low.

use crate::dice::Context;
use crate::display::Face;
use crate::hal::PipOutput;
use crate::time::{has_elapsed, ticks};

/// Nominal 1.1 V bandgap reference, in millivolts.
pub const REFERENCE_MV: u16 = 1100;

/// Supply voltage considered low, in millivolts.
pub const LOW_BATTERY_MV: u16 = 2400;

/// Threshold for [`REFERENCE_MV`] and [`LOW_BATTERY_MV`].
pub const LOW_BATTERY_THRESHOLD: u8 = threshold(REFERENCE_MV, LOW_BATTERY_MV);

/// Interval between warning toggles.
pub const WARN_TOGGLE_TICKS: u8 = ticks(32);

/// Toggles in one warning: three on/off cycles.
pub const WARN_TOGGLES: u8 = 6;

/// Face shown during the "on" half of a warning blink.
pub const WARN_FACE: Face = Face::One;

/// Derives the low-battery ADC threshold from the reference and the
/// low-battery voltage.
///
/// The millivolts per ADC step are truncated first, then the reference is
/// divided by them. Both divisions truncate, and the order matters:
/// `1100 / (2400 / 255)` is 122 where `1100 * 255 / 2400` would be 116.
pub const fn threshold(reference_mv: u16, low_battery_mv: u16) -> u8 {
    (reference_mv / (low_battery_mv / 255)) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Ok,
    Warn,
}

/// Classifies one sample. Higher samples mean lower voltage.
pub fn classify(sample: u8, threshold: u8) -> Level {
    if sample > threshold { Level::Warn } else { Level::Ok }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryState {
    Ok,
    /// A sample is due.
    #[default]
    NeedsCheck,
    /// Blinking the warning; owns the display.
    WarnBlinking,
    /// Warned already; stays quiet until the next check.
    Low,
}

#[derive(Debug)]
pub struct BatteryMonitor {
    state: BatteryState,
    threshold: u8,
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new(LOW_BATTERY_THRESHOLD)
    }
}

impl BatteryMonitor {
    pub fn new(threshold: u8) -> Self {
        Self {
            state: BatteryState::default(),
            threshold,
        }
    }

    pub fn state(&self) -> BatteryState {
        self.state
    }

    pub fn needs_sample(&self) -> bool {
        self.state == BatteryState::NeedsCheck
    }

    pub fn is_warning(&self) -> bool {
        self.state == BatteryState::WarnBlinking
    }

    /// Resolves a pending check with one sample. Ignored when no check is
    /// pending.
    pub fn record(&mut self, sample: u8) {
        if !self.needs_sample() {
            return;
        }

        self.state = match classify(sample, self.threshold) {
            Level::Warn => BatteryState::WarnBlinking,
            Level::Ok => BatteryState::Ok,
        };

        #[cfg(feature = "defmt")]
        defmt::info!("battery sample {} -> {}", sample, self.state);
    }

    /// Asks for a fresh sample on the next iteration.
    pub fn request_check(&mut self) {
        self.state = BatteryState::NeedsCheck;
    }

    /// Advances the warning blink. Call only while [`is_warning`](Self::is_warning).
    ///
    /// Uses the shared phase start as the toggle reference and the cycle
    /// count as the toggle counter. Odd toggles show [`WARN_FACE`], even
    /// toggles blank the display; the sixth toggle ends the warning.
    pub fn blink(&mut self, ctx: &mut Context, display: &mut impl PipOutput) {
        if !has_elapsed(ctx.now, ctx.phase.start, WARN_TOGGLE_TICKS) {
            return;
        }

        ctx.phase.start = ctx.now;
        ctx.phase.count += 1;

        let face = if ctx.phase.count % 2 == 1 { WARN_FACE } else { Face::Blank };
        display.show(face.pips());

        if ctx.phase.count >= WARN_TOGGLES {
            ctx.phase.count = 0;
            self.state = BatteryState::Low;
        }
    }
}
