#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal representations.
//!
//! Variables are 1-based `u32`s as in DIMACS; variable `0` is never handed out.
//! Every literal type exposes a dense `index()` so watch lists can be plain
//! vectors indexed by literal.

use core::ops::{Neg, Not};
use std::fmt::Debug;
use std::hash::Hash;

/// A propositional variable identifier.
pub type Variable = u32;

/// Common interface over literal encodings.
pub trait Literal: Copy + Debug + Eq + Hash + Default + Ord {
    /// Builds a literal of `var`; `polarity == true` is the positive literal.
    fn new(var: Variable, polarity: bool) -> Self;

    /// The variable this literal refers to.
    fn variable(self) -> Variable;

    /// `true` for the positive literal.
    fn polarity(self) -> bool;

    /// The complementary literal.
    #[must_use]
    fn negated(self) -> Self;

    /// Dense index, `2 * var` for positive and `2 * var + 1` for negative literals.
    fn index(self) -> usize {
        (self.variable() as usize) * 2 + usize::from(!self.polarity())
    }

    /// `true` for the negative literal.
    fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// Converts from the signed DIMACS convention.
    #[must_use]
    fn from_i32(value: i32) -> Self {
        let polarity = value.is_positive();
        let var = value.unsigned_abs();
        Self::new(var, polarity)
    }

    /// Converts to the signed DIMACS convention.
    fn to_i32(self) -> i32 {
        #[allow(clippy::cast_possible_wrap)]
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }
}

/// Sign in the top bit, variable in the low 31 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var & 0x7FFF_FFFF | (u32::from(polarity) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & 0x7FFF_FFFF
    }

    fn polarity(self) -> bool {
        (self.0 >> 31) != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 0x8000_0000)
    }
}

/// `2 * var` for the positive literal, `2 * var + 1` for the negative one.
///
/// Its raw value doubles as the watch-list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DoubleLiteral(u32);

impl Literal for DoubleLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        if polarity {
            Self(var * 2)
        } else {
            Self(var * 2 + 1)
        }
    }

    fn variable(self) -> Variable {
        self.0 / 2
    }

    fn polarity(self) -> bool {
        self.0 % 2 == 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Neg for DoubleLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for DoubleLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
