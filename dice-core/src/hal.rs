//! Capabilities a board provides to the dice.
//!
//! The core never touches registers. A board implements these five traits
//! (and so [`Board`]) and hands itself to a [`crate::Runner`].
#![allow(async_fn_in_trait)]

use crate::display::Pips;

/// The pip display.
pub trait PipOutput {
    /// Lights exactly the given pip groups.
    fn show(&mut self, pips: Pips);
}

/// The single dice button.
pub trait ButtonInput {
    /// Current raw level, `true` while held down.
    fn is_pressed(&mut self) -> bool;
}

/// Supply voltage measurement.
pub trait BatterySampler {
    /// Reads an internal reference against the supply rail.
    ///
    /// The 8-bit result grows as the supply voltage falls.
    async fn sample(&mut self) -> u8;
}

/// The periodic 16 ms tick.
pub trait TickSource {
    /// Consumes the pending tick, if any. Returns `true` when one elapsed.
    fn take_tick(&mut self) -> bool;

    /// Whether a tick elapsed that [`take_tick`](Self::take_tick) has not
    /// consumed yet.
    fn is_pending(&self) -> bool;

    /// Stops ticking. Only a button edge wakes the processor afterwards.
    fn pause(&mut self);

    /// Restarts ticking one full period from now.
    fn resume(&mut self);

    fn is_paused(&self) -> bool;
}

/// Low-power wait.
pub trait LowPowerSuspend {
    /// Waits in the lowest available power state until the next tick (if the
    /// tick source runs) or the next button edge.
    ///
    /// Must return at once if a tick is already pending, and must not lose a
    /// button edge that arrives while it is being entered.
    async fn suspend(&mut self);
}

/// Everything the [`crate::Runner`] needs from a board.
pub trait Board: PipOutput + ButtonInput + BatterySampler + TickSource + LowPowerSuspend {}

impl<T> Board for T where T: PipOutput + ButtonInput + BatterySampler + TickSource + LowPowerSuspend {}
