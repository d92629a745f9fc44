//! Sleep policy.
//!
//! The dice sleeps between every iteration. The only question is whether the
//! 16 ms tick keeps running: with nothing left to animate it is switched off
//! and only the button can wake the dice. The battery cannot be rechecked
//! in that state, so a check is queued for the next wake-up instead.

use crate::animator::AnimatorState;
use crate::battery::BatteryState;
use crate::button::ButtonState;

/// How deeply the dice may sleep after an iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Power {
    /// Keep ticking; sleep until the next tick or button edge.
    Sleep,
    /// Stop the tick and sleep until the button is pressed.
    DeepSleep,
}

/// Picks the sleep depth from the state left by one iteration.
///
/// # Arguments
///
/// * `pressed` - Raw button level sampled this iteration
/// * `button` - Debouncer state
/// * `animator` - Roll animation state
/// * `battery` - Battery monitor state
pub fn schedule(
    pressed: bool,
    button: ButtonState,
    animator: AnimatorState,
    battery: BatteryState,
) -> Power {
    let idle = !pressed
        && button == ButtonState::NotPressed
        && animator == AnimatorState::Idle
        && battery != BatteryState::WarnBlinking;

    if idle { Power::DeepSleep } else { Power::Sleep }
}
