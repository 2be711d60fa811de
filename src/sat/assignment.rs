#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Solutions;
use core::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    pub const fn is_false(self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

/// Current value of every variable, indexed by variable (slot `0` unused).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment {
    states: Vec<VarState>,
    assigned: usize,
}

impl Index<Variable> for VecAssignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.states[index as usize]
    }
}

impl VecAssignment {
    pub fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars.max(1)],
            assigned: 0,
        }
    }

    /// Makes room for one more variable and returns its id.
    pub fn grow(&mut self) -> Variable {
        self.states.push(VarState::Unassigned);
        #[allow(clippy::cast_possible_truncation)]
        let var = (self.states.len() - 1) as Variable;
        var
    }

    /// Number of usable variables.
    pub fn num_vars(&self) -> usize {
        self.states.len() - 1
    }

    pub fn assign<L: Literal>(&mut self, lit: L) {
        let slot = &mut self.states[lit.variable() as usize];
        if slot.is_unassigned() {
            self.assigned += 1;
        }
        *slot = VarState::Assigned(lit.polarity());
    }

    pub fn unassign(&mut self, var: Variable) {
        let slot = &mut self.states[var as usize];
        if slot.is_assigned() {
            self.assigned -= 1;
        }
        *slot = VarState::Unassigned;
    }

    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self.states.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn literal_value<L: Literal>(&self, lit: L) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    pub fn is_assigned(&self, var: Variable) -> bool {
        self[var].is_assigned()
    }

    pub fn all_assigned(&self) -> bool {
        self.assigned + 1 == self.states.len()
    }

    /// Reads the full assignment; unassigned variables read as false.
    pub fn get_solutions(&self) -> Solutions {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let lits = self
            .states
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, s)| if s.is_true() { i as i32 } else { -(i as i32) })
            .collect::<Vec<_>>();
        Solutions::new(&lits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::DoubleLiteral;

    #[test]
    fn test_assign_and_read_back() {
        let mut a = VecAssignment::new(4);
        a.assign(DoubleLiteral::from_i32(2));
        a.assign(DoubleLiteral::from_i32(-3));
        assert_eq!(a.var_value(2), Some(true));
        assert_eq!(a.var_value(3), Some(false));
        assert_eq!(a.var_value(1), None);
        assert_eq!(a.literal_value(DoubleLiteral::from_i32(-3)), Some(true));
        assert_eq!(a.literal_value(DoubleLiteral::from_i32(2)), Some(true));
        assert_eq!(a.literal_value(DoubleLiteral::from_i32(-2)), Some(false));
    }

    #[test]
    fn test_all_assigned_counts() {
        let mut a = VecAssignment::new(3);
        assert!(!a.all_assigned());
        a.assign(DoubleLiteral::from_i32(1));
        a.assign(DoubleLiteral::from_i32(-2));
        assert!(a.all_assigned());
        a.unassign(2);
        assert!(!a.all_assigned());
    }

    #[test]
    fn test_grow() {
        let mut a = VecAssignment::new(1);
        assert_eq!(a.num_vars(), 0);
        assert_eq!(a.grow(), 1);
        assert_eq!(a.grow(), 2);
        assert_eq!(a.num_vars(), 2);
    }
}
