//! Search values and tapered evaluation scores.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::MAX_PLY;

/// A search value in centipawn-like units.
pub type Value = i32;

pub const VALUE_ZERO: Value = 0;
pub const VALUE_DRAW: Value = 0;
pub const VALUE_MATE: Value = 32000;
pub const VALUE_INFINITE: Value = 32001;

/// Lower bound of the mate-score window; anything at or above this is a
/// forced mate within `MAX_PLY` plies.
pub const VALUE_MATE_IN_MAX_PLY: Value = VALUE_MATE - MAX_PLY as Value;

/// Value of delivering mate in `ply` half-moves from the root.
#[inline]
#[must_use]
pub const fn mate_in(ply: usize) -> Value {
    VALUE_MATE - ply as Value
}

/// Value of being mated in `ply` half-moves from the root.
#[inline]
#[must_use]
pub const fn mated_in(ply: usize) -> Value {
    -VALUE_MATE + ply as Value
}

/// A middlegame/endgame score pair packed in one 32-bit word, endgame
/// half in the upper 16 bits. Addition and subtraction act on both
/// halves at once; extraction undoes the carry between them.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Score(i32);

impl Score {
    pub const ZERO: Score = Score(0);

    #[inline]
    #[must_use]
    pub const fn make(mg: Value, eg: Value) -> Score {
        Score((((eg as u32) << 16) as i32).wrapping_add(mg))
    }

    /// Middlegame component.
    #[inline]
    #[must_use]
    pub const fn mg(self) -> Value {
        self.0 as u16 as i16 as Value
    }

    /// Endgame component.
    #[inline]
    #[must_use]
    pub const fn eg(self) -> Value {
        (((self.0 as u32).wrapping_add(0x8000) >> 16) as u16 as i16) as Value
    }
}

impl Add for Score {
    type Output = Score;
    #[inline]
    fn add(self, rhs: Score) -> Score {
        Score(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Score {
    type Output = Score;
    #[inline]
    fn sub(self, rhs: Score) -> Score {
        Score(self.0.wrapping_sub(rhs.0))
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}

impl Neg for Score {
    type Output = Score;
    #[inline]
    fn neg(self) -> Score {
        Score::make(-self.mg(), -self.eg())
    }
}

impl Mul<i32> for Score {
    type Output = Score;
    #[inline]
    fn mul(self, rhs: i32) -> Score {
        Score::make(self.mg() * rhs, self.eg() * rhs)
    }
}

impl std::fmt::Debug for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score({}, {})", self.mg(), self.eg())
    }
}
