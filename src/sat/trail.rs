#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::assignment::VecAssignment;
use crate::sat::literal::{Literal, Variable};
use std::ops::Index;

/// Why a literal is on the trail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Copy, Hash, PartialOrd, Ord)]
pub enum Reason {
    #[default]
    Decision,
    /// Fixed at level 0 by a unit clause.
    Unit,
    /// Implied by the clause at this index; the implied literal sits at position 0.
    Clause(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step<L: Literal> {
    pub lit: L,
    pub decision_level: usize,
    pub reason: Reason,
}

/// Assigned literals in assignment order.
///
/// `curr_idx` is the propagation head: steps before it have had their
/// watches visited. `level_starts[d]` is the trail position of the decision
/// opening level `d + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail<L: Literal> {
    t: Vec<Step<L>>,
    pub curr_idx: usize,
    level_starts: Vec<usize>,
    lit_to_level: Vec<usize>,
    lit_to_reason: Vec<Reason>,
}

impl<L: Literal> Index<usize> for Trail<L> {
    type Output = Step<L>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}

impl<L: Literal> Trail<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            t: Vec::with_capacity(num_vars),
            curr_idx: 0,
            level_starts: Vec::new(),
            lit_to_level: vec![0; num_vars.max(1)],
            lit_to_reason: vec![Reason::Decision; num_vars.max(1)],
        }
    }

    pub fn grow(&mut self) {
        self.lit_to_level.push(0);
        self.lit_to_reason.push(Reason::Decision);
    }

    #[must_use]
    pub fn decision_level(&self) -> usize {
        self.level_starts.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step<L>> {
        self.t.iter()
    }

    #[must_use]
    pub fn level(&self, var: Variable) -> usize {
        self.lit_to_level[var as usize]
    }

    #[must_use]
    pub fn reason(&self, var: Variable) -> Reason {
        self.lit_to_reason[var as usize]
    }

    /// Opens a new decision level.
    pub fn new_decision_level(&mut self) {
        self.level_starts.push(self.t.len());
    }

    /// Records `lit` at the current decision level and assigns it.
    pub fn push(&mut self, a: &mut VecAssignment, lit: L, reason: Reason) {
        let var = lit.variable() as usize;
        let decision_level = self.decision_level();
        a.assign(lit);
        self.lit_to_level[var] = decision_level;
        self.lit_to_reason[var] = reason;
        self.t.push(Step {
            lit,
            decision_level,
            reason,
        });
    }

    /// Undoes every assignment above `level` and returns the removed steps,
    /// most recent last.
    pub fn backstep_to(&mut self, a: &mut VecAssignment, level: usize) -> Vec<Step<L>> {
        if level >= self.decision_level() {
            return Vec::new();
        }

        let truncate_at = self.level_starts[level];
        let removed = self.t.split_off(truncate_at);
        for step in &removed {
            a.unassign(step.lit.variable());
        }
        self.level_starts.truncate(level);
        self.curr_idx = self.curr_idx.min(truncate_at);
        removed
    }
}
