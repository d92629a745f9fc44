//! Roll animation state machine.
//!
//! ```text
//! Idle ──press──▶ Rolling ──schedule done──▶ RollSettling ──4 blinks──▶ Steady ──2 s──▶ Idle
//!                    ▲                                                          │
//!                    └──────────────────────── press (from any state) ─────────┘
//! ```
//!
//! While rolling, the shown face counts up with growing pauses so the dice
//! appears to slow down. Only the final face is random. Once rolling, the
//! animation runs to completion whether or not the button is still held;
//! holding it just keeps the spin at its fastest step.

use crate::dice::Context;
use crate::display::Face;
use crate::hal::PipOutput;
use crate::rng::Rng;
use crate::time::{has_elapsed, ticks};

/// Pause before each spin step. A press starts at index 1; the step that
/// walks off the end draws the result.
pub const ROLL_DELAYS: [u8; 5] = [0, ticks(50), ticks(100), ticks(200), ticks(400)];

/// Result visible during each settle blink.
pub const SHOW_TICKS: u8 = ticks(200);

/// Result hidden between settle blinks.
pub const HIDE_TICKS: u8 = ticks(50);

/// Settle blinks before the result is held.
pub const SETTLE_BLINKS: u8 = 4;

/// How long the result stays lit after settling.
pub const STEADY_TICKS: u8 = ticks(2000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimatorState {
    #[default]
    Idle,
    Rolling,
    RollSettling,
    Steady,
}

#[derive(Debug, Default)]
pub struct Animator {
    state: AnimatorState,
    /// Face last written by the animation; the result once drawn.
    face: Face,
    /// Index into [`ROLL_DELAYS`] of the pause being waited out.
    step: usize,
}

impl Animator {
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn face(&self) -> Face {
        self.face
    }

    /// Button held: (re)starts rolling at the fastest step.
    ///
    /// The spin continues from the last face shown.
    pub fn press(&mut self) {
        self.step = 1;
        self.state = AnimatorState::Rolling;
    }

    /// Advances the animation by one iteration.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared context; `phase` holds the reference tick, the
    ///   settle blink duration and the blink count
    /// * `rng` - Draws the result when the spin ends
    /// * `display` - Receives each new face
    pub fn update(&mut self, ctx: &mut Context, rng: &mut Rng, display: &mut impl PipOutput) {
        match self.state {
            AnimatorState::Idle => {}
            AnimatorState::Rolling => self.spin(ctx, rng, display),
            AnimatorState::RollSettling => self.settle(ctx, display),
            AnimatorState::Steady => {
                if has_elapsed(ctx.now, ctx.phase.start, STEADY_TICKS) {
                    display.show(Face::Blank.pips());
                    self.state = AnimatorState::Idle;
                }
            }
        }
    }

    fn spin(&mut self, ctx: &mut Context, rng: &mut Rng, display: &mut impl PipOutput) {
        if !has_elapsed(ctx.now, ctx.phase.start, ROLL_DELAYS[self.step]) {
            return;
        }

        ctx.phase.start = ctx.now;
        self.step += 1;

        if self.step >= ROLL_DELAYS.len() {
            self.face = rng.roll();
            self.state = AnimatorState::RollSettling;

            #[cfg(feature = "defmt")]
            defmt::info!("rolled {}", self.face);
        } else {
            self.face = self.face.next_spin();
        }
        display.show(self.face.pips());
    }

    fn settle(&mut self, ctx: &mut Context, display: &mut impl PipOutput) {
        let phase = &mut ctx.phase;
        if phase.duration != 0 && !has_elapsed(ctx.now, phase.start, phase.duration) {
            return;
        }

        phase.start = ctx.now;
        if phase.duration == SHOW_TICKS {
            phase.duration = HIDE_TICKS;
            display.show(Face::Blank.pips());
        } else {
            phase.duration = SHOW_TICKS;
            display.show(self.face.pips());

            phase.count += 1;
            if phase.count >= SETTLE_BLINKS {
                phase.count = 0;
                phase.duration = 0;
                self.state = AnimatorState::Steady;
            }
        }
    }
}
