#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Decision variable heuristics.

use crate::sat::assignment::VecAssignment;
use crate::sat::literal::Variable;
use clap::ValueEnum;
use ordered_float::OrderedFloat;
use std::fmt::{Debug, Display};

pub trait VariableSelection: Debug + Clone {
    fn new(num_vars: usize) -> Self;

    /// Registers one more variable.
    fn grow(&mut self);

    /// Next unassigned variable to branch on, `None` when all are assigned.
    fn pick(&mut self, assignment: &VecAssignment) -> Option<Variable>;

    fn bump(&mut self, var: Variable);

    fn bumps<T: IntoIterator<Item = Variable>>(&mut self, vars: T) {
        for var in vars {
            self.bump(var);
        }
    }

    /// Called once per conflict.
    fn decay(&mut self);
}

const DEFAULT_DECAY: f64 = 0.95;
const RESCALE_LIMIT: f64 = 1e100;

/// Exponential VSIDS: bumps grow geometrically instead of decaying every score.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Vsids {
    activity: Vec<f64>,
    increment: f64,
}

impl Vsids {
    #[must_use]
    pub fn get(&self, var: Variable) -> f64 {
        self.activity[var as usize]
    }

    fn rescale(&mut self) {
        for v in &mut self.activity {
            *v /= RESCALE_LIMIT;
        }
        self.increment /= RESCALE_LIMIT;
    }
}

impl VariableSelection for Vsids {
    fn new(num_vars: usize) -> Self {
        Self {
            activity: vec![0.0; num_vars.max(1)],
            increment: 1.0,
        }
    }

    fn grow(&mut self) {
        self.activity.push(0.0);
    }

    fn pick(&mut self, assignment: &VecAssignment) -> Option<Variable> {
        (1..self.activity.len())
            .filter(|&i| {
                #[allow(clippy::cast_possible_truncation)]
                let var = i as Variable;
                assignment[var].is_unassigned()
            })
            .min_by_key(|&i| (OrderedFloat(-self.activity[i]), i))
            .map(|i| {
                #[allow(clippy::cast_possible_truncation)]
                let var = i as Variable;
                var
            })
    }

    fn bump(&mut self, var: Variable) {
        self.activity[var as usize] += self.increment;
        if self.activity[var as usize] > RESCALE_LIMIT {
            self.rescale();
        }
    }

    fn decay(&mut self) {
        self.increment /= DEFAULT_DECAY;
        if self.increment > RESCALE_LIMIT {
            self.rescale();
        }
    }
}

/// Lowest-numbered unassigned variable first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOrder(usize);

impl VariableSelection for FixedOrder {
    fn new(num_vars: usize) -> Self {
        Self(num_vars.max(1))
    }

    fn grow(&mut self) {
        self.0 += 1;
    }

    fn pick(&mut self, assignment: &VecAssignment) -> Option<Variable> {
        #[allow(clippy::cast_possible_truncation)]
        let end = self.0 as Variable;
        (1..end).find(|&i| assignment[i].is_unassigned())
    }

    fn bump(&mut self, _: Variable) {}

    fn decay(&mut self) {}
}

/// Uniformly random unassigned variable, seeded for reproducible runs.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    num_vars: usize,
    rng: fastrand::Rng,
}

impl VariableSelection for RandomOrder {
    fn new(num_vars: usize) -> Self {
        Self {
            num_vars: num_vars.max(1),
            rng: fastrand::Rng::with_seed(0x5eed),
        }
    }

    fn grow(&mut self) {
        self.num_vars += 1;
    }

    fn pick(&mut self, assignment: &VecAssignment) -> Option<Variable> {
        #[allow(clippy::cast_possible_truncation)]
        let end = self.num_vars as Variable;
        let free = (1..end)
            .filter(|&i| assignment[i].is_unassigned())
            .collect::<Vec<_>>();
        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.usize(..free.len())])
        }
    }

    fn bump(&mut self, _: Variable) {}

    fn decay(&mut self) {}
}

/// Heuristic choice made at runtime, e.g. from the command line.
#[derive(Debug, Clone)]
pub enum VariableSelectionImpls {
    Vsids(Vsids),
    Fixed(FixedOrder),
    Random(RandomOrder),
}

impl VariableSelection for VariableSelectionImpls {
    fn new(num_vars: usize) -> Self {
        Self::Vsids(Vsids::new(num_vars))
    }

    fn grow(&mut self) {
        match self {
            Self::Vsids(v) => v.grow(),
            Self::Fixed(v) => v.grow(),
            Self::Random(v) => v.grow(),
        }
    }

    fn pick(&mut self, assignment: &VecAssignment) -> Option<Variable> {
        match self {
            Self::Vsids(v) => v.pick(assignment),
            Self::Fixed(v) => v.pick(assignment),
            Self::Random(v) => v.pick(assignment),
        }
    }

    fn bump(&mut self, var: Variable) {
        match self {
            Self::Vsids(v) => v.bump(var),
            Self::Fixed(v) => v.bump(var),
            Self::Random(v) => v.bump(var),
        }
    }

    fn decay(&mut self) {
        match self {
            Self::Vsids(v) => v.decay(),
            Self::Fixed(v) => v.decay(),
            Self::Random(v) => v.decay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VariableSelectionType {
    #[default]
    Vsids,
    Fixed,
    Random,
}

impl VariableSelectionType {
    #[must_use]
    pub fn to_impl(self, num_vars: usize) -> VariableSelectionImpls {
        match self {
            Self::Vsids => VariableSelectionImpls::Vsids(Vsids::new(num_vars)),
            Self::Fixed => VariableSelectionImpls::Fixed(FixedOrder::new(num_vars)),
            Self::Random => VariableSelectionImpls::Random(RandomOrder::new(num_vars)),
        }
    }
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vsids => write!(f, "vsids"),
            Self::Fixed => write!(f, "fixed"),
            Self::Random => write!(f, "random"),
        }
    }
}
