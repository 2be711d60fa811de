#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;
use std::fmt::Debug;

/// Picks the polarity tried first when branching on a variable.
pub trait PhaseSelector: Debug + Clone {
    fn new(num_vars: usize) -> Self;
    fn grow(&mut self);
    /// Remembers the polarity `lit` had when it was unassigned.
    fn save(&mut self, lit: impl Literal);
    fn get_next(&mut self, var: Variable) -> bool;
}

/// Reuses the last polarity a variable had; starts out negative.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SavedPhases(BitVec);

impl PhaseSelector for SavedPhases {
    fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars.max(1), false))
    }

    fn grow(&mut self) {
        self.0.push(false);
    }

    fn save(&mut self, lit: impl Literal) {
        self.0.set(lit.variable() as usize, lit.polarity());
    }

    fn get_next(&mut self, var: Variable) -> bool {
        self.0.get(var as usize).unwrap_or(false)
    }
}

/// Coin flip per decision.
#[derive(Clone, Debug)]
pub struct RandomPhases(fastrand::Rng);

impl PhaseSelector for RandomPhases {
    fn new(_: usize) -> Self {
        Self(fastrand::Rng::with_seed(0x5eed))
    }

    fn grow(&mut self) {}

    fn save(&mut self, _: impl Literal) {}

    fn get_next(&mut self, _: Variable) -> bool {
        self.0.bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::DoubleLiteral;

    #[test]
    fn test_saved_phase_round_trip() {
        let mut phases = SavedPhases::new(4);
        assert!(!phases.get_next(2));
        phases.save(DoubleLiteral::new(2, true));
        assert!(phases.get_next(2));
        phases.save(DoubleLiteral::new(2, false));
        assert!(!phases.get_next(2));
    }

    #[test]
    fn test_grow_extends_phases() {
        let mut phases = SavedPhases::new(1);
        phases.grow();
        phases.save(DoubleLiteral::new(1, true));
        assert!(phases.get_next(1));
    }
}
