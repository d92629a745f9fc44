//! Tick arithmetic.
//!
//! The tick counter is a `u8` that wraps every 256 ticks (about 4 seconds).
//! Every timeout in the dice is shorter than that, so elapsed time is always
//! computed with wrapping subtraction from a reference tick.

/// Period of one tick in milliseconds.
pub const TICK_MS: u16 = 16;

/// Converts a duration in milliseconds to whole ticks, truncating.
///
/// Evaluated at compile time for every timing constant; a duration that does
/// not fit the 8-bit counter fails the build.
pub const fn ticks(ms: u16) -> u8 {
    let ticks = ms / TICK_MS;
    assert!(ticks <= u8::MAX as u16, "duration overflows the tick counter");
    ticks as u8
}

/// Ticks elapsed from `since` to `now`, correct across the 255 -> 0 wrap.
pub const fn elapsed(now: u8, since: u8) -> u8 {
    now.wrapping_sub(since)
}

/// Whether at least `threshold` ticks passed since `since`.
pub const fn has_elapsed(now: u8, since: u8, threshold: u8) -> bool {
    elapsed(now, since) >= threshold
}
