//! Drives a [`Dice`] from a [`Board`].

use crate::dice::{Dice, Input};
use crate::hal::Board;
use crate::power::Power;

/// The control loop: samples the board, polls the dice, sleeps.
pub struct Runner<B> {
    dice: Dice,
    board: B,
}

impl<B: Board> Runner<B> {
    /// Takes the startup battery sample and warms the generator up with it.
    ///
    /// The sample only seeds the generator; the first iteration still takes
    /// its own sample to classify the battery.
    pub async fn start(mut board: B, mut dice: Dice) -> Self {
        let sample = board.sample().await;
        dice.warm_up(sample);

        #[cfg(feature = "defmt")]
        defmt::debug!("warmed up with {}", sample);

        Self { dice, board }
    }

    /// Runs one iteration of the control loop, then sleeps.
    ///
    /// A paused tick source means the dice was in deep sleep and the button
    /// woke it: that wake-up counts as a tick and restarts the source. When
    /// a tick is already pending after polling, the step returns without
    /// sleeping so the tick is handled right away.
    ///
    /// # Returns
    ///
    /// The sleep depth the dice asked for.
    pub async fn step(&mut self) -> Power {
        let ticked = if self.board.is_paused() {
            self.board.resume();
            true
        } else {
            self.board.take_tick()
        };
        let pressed = self.board.is_pressed();
        let battery = if self.dice.needs_battery_sample() {
            Some(self.board.sample().await)
        } else {
            None
        };

        let input = Input {
            ticked,
            pressed,
            battery,
        };
        let power = self.dice.poll(input, &mut self.board);

        if !self.board.is_pending() {
            if power == Power::DeepSleep {
                self.board.pause();
                self.dice.enter_deep_sleep();
            }
            self.board.suspend().await;
        }

        power
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
}
