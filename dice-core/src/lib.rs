//! Platform-agnostic control logic for the tiny electronic dice.
//!
//! # Overview
//!
//! The dice is a single cooperative state machine advanced once per loop
//! iteration. Each iteration:
//!
//! 1. The tick source advances the 8-bit tick counter (16 ms per tick)
//! 2. The [`button`] debouncer tracks the raw button level
//! 3. The [`battery`] monitor classifies a fresh sample when one was requested
//! 4. Either the low-battery blink or the roll [`animator`] drives the display
//! 5. The [`power`] scheduler decides whether the tick source may stop
//!
//! # Module Organization
//!
//! - [`time`] - Tick conversion and wrap-safe elapsed time
//! - [`rng`] - 8-bit xorshift generator for the roll result
//! - [`battery`] - Threshold, classification and warning blink
//! - [`button`] - Release debouncing
//! - [`display`] - Faces and their pip patterns
//! - [`animator`] - Roll, settle and steady phases
//! - [`power`] - Sleep policy
//! - [`dice`] - The controller tying the components together
//! - [`hal`] - Capability traits implemented by each board
//! - [`runner`] - Drives a [`Dice`] from a [`hal::Board`]

#![cfg_attr(not(test), no_std)]

pub mod animator;
pub mod battery;
pub mod button;
pub mod dice;
pub mod display;
pub mod hal;
pub mod power;
pub mod rng;
pub mod runner;
pub mod time;

pub use animator::AnimatorState;
pub use battery::BatteryState;
pub use button::ButtonState;
pub use dice::{Context, Dice, Input, Phase};
pub use display::{Face, PipDriver, Pips};
pub use hal::{BatterySampler, Board, ButtonInput, LowPowerSuspend, PipOutput, TickSource};
pub use power::Power;
pub use rng::Rng;
pub use runner::Runner;
