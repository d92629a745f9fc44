//! Dice faces and the pip patterns that show them.
//!
//! # Hardware Design
//!
//! Seven LEDs in the usual dice layout are wired as four groups, each driven
//! by one output line:
//!
//! ```text
//!  D . A      CENTER:        the middle pip
//!  M C M      DIAGONAL:      top-right and bottom-left (D)
//!  A . D      ANTI_DIAGONAL: top-left and bottom-right (A)
//!             MIDDLE:        the two middle-row pips (M)
//! ```
//!
//! Every face is a fixed combination of those groups.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::hal::PipOutput;

/// A set of lit pip groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pips(u8);

impl Pips {
    pub const NONE: Pips = Pips(0);
    pub const CENTER: Pips = Pips(1 << 0);
    pub const DIAGONAL: Pips = Pips(1 << 1);
    pub const ANTI_DIAGONAL: Pips = Pips(1 << 2);
    pub const MIDDLE: Pips = Pips(1 << 3);

    pub const fn union(self, other: Pips) -> Pips {
        Pips(self.0 | other.0)
    }

    pub const fn contains(self, other: Pips) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Pattern for each face, indexed by [`Face::value`].
const PIP_PATTERNS: [Pips; 7] = [
    Pips::NONE,
    Pips::CENTER,
    Pips::DIAGONAL,
    Pips::DIAGONAL.union(Pips::CENTER),
    Pips::DIAGONAL.union(Pips::ANTI_DIAGONAL),
    Pips::DIAGONAL.union(Pips::ANTI_DIAGONAL).union(Pips::CENTER),
    Pips::DIAGONAL.union(Pips::ANTI_DIAGONAL).union(Pips::MIDDLE),
];

/// What the dice shows: nothing, or one of the six faces.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Face {
    #[default]
    Blank = 0,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Face {
    /// Face value, 0 for blank.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn pips(self) -> Pips {
        PIP_PATTERNS[self as usize]
    }

    /// Next face of the spinning animation: counts up and wraps from six
    /// back to one. A blank face spins to one.
    pub const fn next_spin(self) -> Face {
        match self {
            Face::Blank | Face::Six => Face::One,
            Face::One => Face::Two,
            Face::Two => Face::Three,
            Face::Three => Face::Four,
            Face::Four => Face::Five,
            Face::Five => Face::Six,
        }
    }

    /// Maps a random byte to a face as `(byte % 6) + 1`.
    pub const fn from_random(byte: u8) -> Face {
        match byte % 6 {
            0 => Face::One,
            1 => Face::Two,
            2 => Face::Three,
            3 => Face::Four,
            4 => Face::Five,
            _ => Face::Six,
        }
    }
}

/// Drives the four pip groups from individual output pins.
///
/// Lines are active high: a lit group drives its pin high.
pub struct PipDriver<C, D, A, M> {
    /// Centre pip
    center: C,
    /// Top-right and bottom-left pips
    diagonal: D,
    /// Top-left and bottom-right pips
    anti_diagonal: A,
    /// Middle-row pair
    middle: M,
}

impl<C, D, A, M> PipDriver<C, D, A, M>
where
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    A: OutputPin<Error = Infallible>,
    M: OutputPin<Error = Infallible>,
{
    pub fn new(center: C, diagonal: D, anti_diagonal: A, middle: M) -> Self {
        Self {
            center,
            diagonal,
            anti_diagonal,
            middle,
        }
    }

    fn drive<P: OutputPin<Error = Infallible>>(pin: &mut P, lit: bool) {
        let Ok(()) = if lit { pin.set_high() } else { pin.set_low() };
    }
}

impl<C, D, A, M> PipOutput for PipDriver<C, D, A, M>
where
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    A: OutputPin<Error = Infallible>,
    M: OutputPin<Error = Infallible>,
{
    fn show(&mut self, pips: Pips) {
        Self::drive(&mut self.center, pips.contains(Pips::CENTER));
        Self::drive(&mut self.diagonal, pips.contains(Pips::DIAGONAL));
        Self::drive(&mut self.anti_diagonal, pips.contains(Pips::ANTI_DIAGONAL));
        Self::drive(&mut self.middle, pips.contains(Pips::MIDDLE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const FACES: [Face; 7] = [
        Face::Blank,
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    #[derive(Clone, Default)]
    struct LedPin(Rc<Cell<bool>>);

    impl OutputPin for LedPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.set(true);
            Ok(())
        }
    }

    #[test]
    fn patterns_are_distinct() {
        for (i, a) in FACES.iter().enumerate() {
            for b in &FACES[i + 1..] {
                assert_ne!(a.pips(), b.pips(), "{a:?} and {b:?} share a pattern");
            }
        }
    }

    #[test]
    fn blank_lights_nothing() {
        assert_eq!(Face::Blank.pips(), Pips::NONE);
        assert_eq!(Face::Blank.pips().bits(), 0);
    }

    #[test]
    fn pip_counts_match_faces() {
        let lit = |face: Face| {
            let pips = face.pips();
            [
                (Pips::CENTER, 1),
                (Pips::DIAGONAL, 2),
                (Pips::ANTI_DIAGONAL, 2),
                (Pips::MIDDLE, 2),
            ]
            .iter()
            .filter(|(group, _)| pips.contains(*group))
            .map(|(_, leds)| leds)
            .sum::<u8>()
        };
        for face in FACES {
            assert_eq!(lit(face), face.value());
        }
    }

    #[test]
    fn spin_counts_up_and_wraps() {
        let mut face = Face::Blank;
        let mut seen = Vec::new();
        for _ in 0..8 {
            face = face.next_spin();
            seen.push(face.value());
        }
        assert_eq!(seen, [1, 2, 3, 4, 5, 6, 1, 2]);
    }

    #[test]
    fn random_bytes_map_into_one_to_six() {
        for byte in 0..=255u8 {
            let face = Face::from_random(byte);
            assert_eq!(face.value(), byte % 6 + 1);
        }
    }

    #[test]
    fn driver_sets_each_line() {
        let lines: [LedPin; 4] = Default::default();
        let mut driver = PipDriver::new(
            lines[0].clone(),
            lines[1].clone(),
            lines[2].clone(),
            lines[3].clone(),
        );
        let levels = |lines: &[LedPin; 4]| lines.each_ref().map(|p| p.0.get());

        driver.show(Face::Six.pips());
        assert_eq!(levels(&lines), [false, true, true, true]);

        driver.show(Face::Three.pips());
        assert_eq!(levels(&lines), [true, true, false, false]);

        driver.show(Face::Blank.pips());
        assert_eq!(levels(&lines), [false; 4]);
    }

    #[test]
    fn driver_follows_every_face() {
        let lines: [LedPin; 4] = Default::default();
        let mut driver = PipDriver::new(
            lines[0].clone(),
            lines[1].clone(),
            lines[2].clone(),
            lines[3].clone(),
        );
        let groups = [Pips::CENTER, Pips::DIAGONAL, Pips::ANTI_DIAGONAL, Pips::MIDDLE];

        // Every line is rewritten on each show, lit or not.
        for face in FACES.iter().chain(FACES.iter().rev()) {
            driver.show(face.pips());
            for (line, group) in lines.iter().zip(groups) {
                assert_eq!(line.0.get(), face.pips().contains(group), "{face:?}");
            }
        }
    }
}
