#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::cnf::Cnf;
use crate::sat::literal::{DoubleLiteral, Literal, Variable};
use crate::sat::phase_saving::{PhaseSelector, SavedPhases};
use crate::sat::restarter::{Luby, Restarter, RestarterImpls};
use crate::sat::variable_selection::{VariableSelection, VariableSelectionImpls, Vsids};
use std::fmt::{Debug, Display};

/// A total assignment in signed DIMACS form, one entry per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions {
    /// `assignments[v]` is `v` or `-v`; slot `0` and unmentioned variables hold `0`.
    assignments: Vec<i32>,
}

impl Solutions {
    #[must_use]
    pub fn new(lits: &[i32]) -> Self {
        let len = lits.iter().map(|l| l.unsigned_abs() as usize).max().unwrap_or(0) + 1;
        let mut assignments = vec![0; len];
        for &lit in lits {
            assignments[lit.unsigned_abs() as usize] = lit;
        }
        Self { assignments }
    }

    /// Whether the signed literal `lit` holds.
    #[must_use]
    pub fn check(&self, lit: i32) -> bool {
        lit != 0 && self.assignments.get(lit.unsigned_abs() as usize) == Some(&lit)
    }

    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        match self.assignments.get(var as usize) {
            Some(&l) if l != 0 => Some(l > 0),
            _ => None,
        }
    }

    #[must_use]
    pub fn literal_value<L: Literal>(&self, lit: L) -> Option<bool> {
        self.value(lit.variable()).map(|b| b == lit.polarity())
    }

    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.assignments.iter().filter(|&&l| l != 0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for lit in self.iter() {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub conflicts: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub restarts: usize,
    pub learnt_clauses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Sat(Solutions),
    Unsat,
    /// The conflict budget ran out before an answer was found.
    Unknown,
}

impl SolveResult {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsat)
    }
}

/// Bundles the heuristics a solver is instantiated with.
pub trait SolverConfig: Debug + Clone {
    type Literal: Literal;
    type VariableSelector: VariableSelection;
    type Restarter: Restarter;
    type PhaseSelector: PhaseSelector;
}

/// Heuristics fixed at compile time.
#[derive(Debug, Clone, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Literal = DoubleLiteral;
    type VariableSelector = Vsids;
    type Restarter = Luby<100>;
    type PhaseSelector = SavedPhases;
}

/// Heuristics picked at runtime, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type Literal = DoubleLiteral;
    type VariableSelector = VariableSelectionImpls;
    type Restarter = RestarterImpls;
    type PhaseSelector = SavedPhases;
}

pub trait Solver<C: SolverConfig = DefaultConfig> {
    fn new(cnf: Cnf<C::Literal>) -> Self;
    fn solve(&mut self) -> SolveResult;
    fn solutions(&self) -> Solutions;
    fn stats(&self) -> SolutionStats;
}
