//! Button debouncing.
//!
//! Presses are taken at face value: the first pressed sample starts a roll.
//! Only the release is debounced, so contact bounce after letting go does not
//! count as the button being idle and the dice stays awake.

use crate::dice::Context;
use crate::time::{has_elapsed, ticks};

/// Time the button must stay released before it counts as idle.
pub const SETTLE_TICKS: u8 = ticks(50);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    #[default]
    NotPressed,
    Pressed,
    /// Released, waiting out [`SETTLE_TICKS`].
    Debouncing,
}

#[derive(Debug, Default)]
pub struct Debouncer {
    state: ButtonState,
    released_at: u8,
}

impl Debouncer {
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Feeds one raw sample of the button level.
    ///
    /// A press from the idle state restarts the shared phase (reference tick
    /// and counters) so the roll animation starts from a clean slate.
    ///
    /// # Arguments
    ///
    /// * `pressed` - Raw button level, `true` while held
    /// * `ctx` - Shared context; `now` is read, `phase` restarted on a new press
    pub fn update(&mut self, pressed: bool, ctx: &mut Context) {
        if pressed {
            if self.state == ButtonState::NotPressed {
                ctx.phase.restart(ctx.now);

                #[cfg(feature = "defmt")]
                defmt::debug!("button pressed at {}", ctx.now);
            }
            self.state = ButtonState::Pressed;
        } else if self.state == ButtonState::Pressed {
            self.released_at = ctx.now;
            self.state = ButtonState::Debouncing;
        } else if has_elapsed(ctx.now, self.released_at, SETTLE_TICKS) {
            #[cfg(feature = "defmt")]
            if self.state == ButtonState::Debouncing {
                defmt::debug!("button released at {}", ctx.now);
            }

            self.state = ButtonState::NotPressed;
        }
    }
}
