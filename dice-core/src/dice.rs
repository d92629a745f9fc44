//! The dice controller.
//!
//! [`Dice`] owns every component and the shared [`Context`]. One call to
//! [`Dice::poll`] is one iteration of the control loop; the caller supplies
//! the inputs sampled from the board and applies the returned [`Power`] hint.

use crate::animator::{Animator, AnimatorState};
use crate::battery::{BatteryMonitor, BatteryState, LOW_BATTERY_THRESHOLD};
use crate::button::{ButtonState, Debouncer};
use crate::display::Face;
use crate::hal::PipOutput;
use crate::power::{self, Power};
use crate::rng::Rng;

/// Timing of whichever sequence currently owns the display.
///
/// The battery warning and the roll animation never run in the same
/// iteration, so they share one reference tick and one counter. A fresh
/// button press restarts all three fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Phase {
    /// Tick at which the current step started.
    pub start: u8,
    /// Length of the current settle blink phase, 0 before the first.
    pub duration: u8,
    /// Settle blinks shown, or warning toggles done.
    pub count: u8,
}

impl Phase {
    pub fn restart(&mut self, now: u8) {
        self.start = now;
        self.duration = 0;
        self.count = 0;
    }
}

/// State shared by every component during an iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Context {
    /// Tick counter, wraps every 256 ticks.
    pub now: u8,
    pub phase: Phase,
}

/// Inputs sampled from the board for one iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    /// A tick elapsed since the previous iteration.
    pub ticked: bool,
    /// Raw button level.
    pub pressed: bool,
    /// Battery sample, taken only when [`Dice::needs_battery_sample`] asked
    /// for one.
    pub battery: Option<u8>,
}

#[derive(Debug)]
pub struct Dice {
    ctx: Context,
    button: Debouncer,
    battery: BatteryMonitor,
    animator: Animator,
    rng: Rng,
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(LOW_BATTERY_THRESHOLD)
    }
}

impl Dice {
    /// Creates a dice in its reset state: idle, button released, battery
    /// check pending.
    ///
    /// # Arguments
    ///
    /// * `low_battery_threshold` - Battery samples above this warn, see
    ///   [`crate::battery::threshold`]
    pub fn new(low_battery_threshold: u8) -> Self {
        Self {
            ctx: Context::default(),
            button: Debouncer::default(),
            battery: BatteryMonitor::new(low_battery_threshold),
            animator: Animator::default(),
            rng: Rng::new(),
        }
    }

    /// Discards `sample` generator outputs. Call once at startup with an
    /// early battery sample.
    pub fn warm_up(&mut self, sample: u8) {
        self.rng.warm_up(sample);
    }

    pub fn needs_battery_sample(&self) -> bool {
        self.battery.needs_sample()
    }

    /// Runs one iteration.
    ///
    /// The battery warning and the roll animation are exclusive: while the
    /// warning blinks, the animation does not advance at all, even if it is
    /// mid-roll.
    ///
    /// # Returns
    ///
    /// How deeply the board may sleep before the next iteration.
    pub fn poll(&mut self, input: Input, display: &mut impl PipOutput) -> Power {
        if input.ticked {
            self.ctx.now = self.ctx.now.wrapping_add(1);
        }

        self.button.update(input.pressed, &mut self.ctx);
        if input.pressed {
            self.animator.press();
        }

        if let Some(sample) = input.battery {
            self.battery.record(sample);
        }

        if self.battery.is_warning() {
            self.battery.blink(&mut self.ctx, display);
        } else {
            self.animator.update(&mut self.ctx, &mut self.rng, display);
        }

        power::schedule(
            input.pressed,
            self.button.state(),
            self.animator.state(),
            self.battery.state(),
        )
    }

    /// The tick source is about to stop. Queues a battery check for the
    /// next wake-up.
    pub fn enter_deep_sleep(&mut self) {
        self.battery.request_check();

        #[cfg(feature = "defmt")]
        defmt::debug!("deep sleep at {}", self.ctx.now);
    }

    pub fn now(&self) -> u8 {
        self.ctx.now
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Last face shown by the animation; the result once a roll completes.
    pub fn face(&self) -> Face {
        self.animator.face()
    }

    pub fn animator_state(&self) -> AnimatorState {
        self.animator.state()
    }

    pub fn button_state(&self) -> ButtonState {
        self.button.state()
    }

    pub fn battery_state(&self) -> BatteryState {
        self.battery.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Pips;

    #[derive(Default)]
    struct Recorder(Vec<(u8, Pips)>);

    /// Feeds one ticked iteration, recording writes against the new tick.
    fn tick(dice: &mut Dice, display: &mut Recorder, pressed: bool, battery: Option<u8>) -> Power {
        struct At<'a>(&'a mut Vec<(u8, Pips)>, u8);
        impl PipOutput for At<'_> {
            fn show(&mut self, pips: Pips) {
                self.0.push((self.1, pips));
            }
        }

        let now = dice.now().wrapping_add(1);
        let input = Input {
            ticked: true,
            pressed,
            battery,
        };
        dice.poll(input, &mut At(&mut display.0, now))
    }

    fn ok_battery(dice: &Dice) -> Option<u8> {
        dice.needs_battery_sample().then_some(100)
    }

    #[test]
    fn starts_idle_and_wants_a_sample() {
        let dice = Dice::default();
        assert_eq!(dice.animator_state(), AnimatorState::Idle);
        assert_eq!(dice.button_state(), ButtonState::NotPressed);
        assert_eq!(dice.battery_state(), BatteryState::NeedsCheck);
        assert!(dice.needs_battery_sample());
    }

    #[test]
    fn untouched_dice_deep_sleeps_after_check() {
        let mut dice = Dice::default();
        let mut display = Recorder::default();
        let power = tick(&mut dice, &mut display, false, Some(100));
        assert_eq!(power, Power::DeepSleep);
        assert_eq!(dice.battery_state(), BatteryState::Ok);

        dice.enter_deep_sleep();
        assert!(dice.needs_battery_sample());
        assert!(display.0.is_empty());
    }

    #[test]
    fn holding_the_button_keeps_spinning() {
        let mut dice = Dice::default();
        let mut display = Recorder::default();
        for _ in 0..40 {
            let battery = ok_battery(&dice);
            assert_eq!(tick(&mut dice, &mut display, true, battery), Power::Sleep);
        }
        assert_eq!(dice.animator_state(), AnimatorState::Rolling);

        // Fastest step only: a new face every three ticks.
        let times: Vec<u8> = display.0.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, [4, 7, 10, 13, 16, 19, 22, 25, 28, 31, 34, 37, 40]);
    }

    #[test]
    fn warning_stalls_the_roll() {
        let mut dice = Dice::default();
        let mut display = Recorder::default();

        // Pressed on the first iteration with an empty battery.
        tick(&mut dice, &mut display, true, Some(200));
        assert_eq!(dice.battery_state(), BatteryState::WarnBlinking);
        assert_eq!(dice.animator_state(), AnimatorState::Rolling);

        for _ in 0..12 {
            tick(&mut dice, &mut display, false, None);
        }
        assert_eq!(dice.battery_state(), BatteryState::Low);

        let on = Face::One.pips();
        let off = Face::Blank.pips();
        assert_eq!(
            display.0,
            [(3, on), (5, off), (7, on), (9, off), (11, on), (13, off)]
        );
        assert_eq!(dice.face(), Face::Blank);

        // The roll picks up where it stalled.
        for _ in 0..3 {
            tick(&mut dice, &mut display, false, None);
        }
        assert_eq!(display.0.last(), Some(&(16, Face::One.pips())));
    }

    #[test]
    fn press_during_steady_rolls_again() {
        let mut dice = Dice::default();
        let mut display = Recorder::default();

        tick(&mut dice, &mut display, true, Some(100));
        while dice.animator_state() != AnimatorState::Steady {
            tick(&mut dice, &mut display, false, None);
        }
        let first = dice.face();

        assert_eq!(tick(&mut dice, &mut display, true, None), Power::Sleep);
        assert_eq!(dice.animator_state(), AnimatorState::Rolling);
        assert_eq!(dice.context().phase.start, dice.now());

        while dice.animator_state() != AnimatorState::Idle {
            tick(&mut dice, &mut display, false, None);
        }
        // Second roll spins on from the first result.
        let spun: Vec<Pips> = display
            .0
            .iter()
            .rev()
            .skip(9)
            .take(3)
            .map(|(_, pips)| *pips)
            .collect();
        assert_eq!(
            spun,
            [
                first.next_spin().next_spin().next_spin().pips(),
                first.next_spin().next_spin().pips(),
                first.next_spin().pips(),
            ]
        );
    }

    #[test]
    fn press_during_settle_restarts_the_roll() {
        let mut dice = Dice::default();
        let mut display = Recorder::default();

        // First roll pressed at tick 1; its first blank lands on tick 60.
        tick(&mut dice, &mut display, true, Some(100));
        while dice.now() < 61 {
            tick(&mut dice, &mut display, false, None);
        }
        assert_eq!(dice.animator_state(), AnimatorState::RollSettling);
        assert_eq!(dice.button_state(), ButtonState::NotPressed);
        assert_eq!(dice.context().phase.count, 1);
        assert_eq!(dice.context().phase.duration, crate::animator::HIDE_TICKS);

        let first = dice.face();
        assert_eq!(first, Face::from_random(125));
        display.0.clear();

        assert_eq!(tick(&mut dice, &mut display, true, None), Power::Sleep);
        assert_eq!(dice.animator_state(), AnimatorState::Rolling);
        assert_eq!(
            dice.context().phase,
            Phase {
                start: 62,
                duration: 0,
                count: 0
            }
        );

        while dice.animator_state() != AnimatorState::Idle {
            tick(&mut dice, &mut display, false, None);
        }

        // A full second roll from tick 62, with all four settle blinks.
        let second = Face::from_random(67);
        let r = second.pips();
        let blank = Face::Blank.pips();
        assert_eq!(
            display.0,
            [
                (65, first.next_spin().pips()),
                (71, first.next_spin().next_spin().pips()),
                (83, first.next_spin().next_spin().next_spin().pips()),
                (108, r),
                (109, r),
                (121, blank),
                (124, r),
                (136, blank),
                (139, r),
                (151, blank),
                (154, r),
                // Held for 125 ticks, past the wrap.
                (23, blank),
            ]
        );
        assert_eq!(dice.face(), second);
    }
}
