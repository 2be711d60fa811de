#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conflict-driven clause learning.
//!
//! The solver is incremental: clauses and variables can be added between
//! calls to [`Cdcl::solve_with_budget`], and learnt clauses are kept across
//! calls. Every call starts and ends at decision level 0.

use crate::sat::assignment::VecAssignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::conflict_analysis::{Conflict, analyse_conflict};
use crate::sat::literal::{Literal, Variable};
use crate::sat::phase_saving::PhaseSelector;
use crate::sat::restarter::Restarter;
use crate::sat::solver::{
    DefaultConfig, SolutionStats, SolveResult, Solutions, Solver, SolverConfig,
};
use crate::sat::trail::{Reason, Trail};
use crate::sat::variable_selection::VariableSelection;
use crate::sat::watch::WatchedLiterals;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Cdcl<C: SolverConfig = DefaultConfig> {
    pub assignment: VecAssignment,
    pub watched_literals: WatchedLiterals,
    pub cnf: Cnf<C::Literal>,
    pub selector: C::VariableSelector,
    pub phases: C::PhaseSelector,
    pub trail: Trail<C::Literal>,
    pub restarter: C::Restarter,
    stats: SolutionStats,
    /// Set once a conflict is found at level 0; never cleared.
    unsat: bool,
}

impl<C: SolverConfig> Cdcl<C> {
    /// An empty solver using the given heuristics.
    pub fn from_parts(selector: C::VariableSelector, restarter: C::Restarter) -> Self {
        Self {
            assignment: VecAssignment::new(1),
            watched_literals: WatchedLiterals::new(1),
            cnf: Cnf::new(Vec::new()),
            selector,
            phases: C::PhaseSelector::new(1),
            trail: Trail::new(1),
            restarter,
            stats: SolutionStats::default(),
            unsat: false,
        }
    }

    /// An empty solver with the configuration's default heuristics.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_parts(C::VariableSelector::new(1), C::Restarter::new())
    }

    #[must_use]
    pub const fn cnf(&self) -> &Cnf<C::Literal> {
        &self.cnf
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.assignment.num_vars()
    }

    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        self.unsat
    }

    /// Allocates a fresh variable.
    pub fn new_var(&mut self) -> Variable {
        let var = self.assignment.grow();
        self.watched_literals.grow();
        self.trail.grow();
        self.selector.grow();
        self.phases.grow();
        self.cnf.num_vars = self.cnf.num_vars.max(var as usize + 1);
        var
    }

    fn ensure_var(&mut self, var: Variable) {
        while self.num_vars() < var as usize {
            self.new_var();
        }
    }

    /// Adds a clause at decision level 0.
    ///
    /// Literals already false at level 0 are moved behind the rest; a clause
    /// already satisfied at level 0 is stored but never watched. Returns
    /// `false` once the formula is known to be unsatisfiable.
    pub fn add_clause(&mut self, mut clause: Clause<C::Literal>) -> bool {
        self.backtrack(0);
        if self.unsat {
            return false;
        }

        clause.normalise();
        if clause.is_tautology() {
            return true;
        }
        if let Some(max) = clause.iter().map(|l| l.variable()).max() {
            self.ensure_var(max);
        }

        let assignment = &self.assignment;
        if clause
            .iter()
            .any(|&l| assignment.literal_value(l) == Some(true))
        {
            self.cnf.add_clause(clause);
            return true;
        }
        clause
            .literals
            .sort_by_key(|&l| assignment.literal_value(l) == Some(false));
        let open = clause
            .iter()
            .take_while(|&&l| assignment.literal_value(l).is_none())
            .count();

        let c_ref = self.cnf.len();
        match open {
            0 => {
                debug!("empty clause added at level 0");
                self.unsat = true;
                self.cnf.add_clause(clause);
                false
            }
            1 => {
                let lit = clause[0];
                self.cnf.add_clause(clause);
                self.trail.push(&mut self.assignment, lit, Reason::Unit);
                true
            }
            _ => {
                self.cnf.add_clause(clause);
                self.watched_literals.add_clause(&self.cnf[c_ref], c_ref);
                true
            }
        }
    }

    /// Undoes every decision above `level`, saving the phases of the
    /// unassigned variables.
    pub fn backtrack(&mut self, level: usize) {
        for step in self.trail.backstep_to(&mut self.assignment, level) {
            self.phases.save(step.lit);
        }
    }

    /// Propagates the queued trail literals; returns the index of a falsified
    /// clause on conflict.
    fn propagate(&mut self) -> Option<usize> {
        while self.trail.curr_idx < self.trail.len() {
            let lit = self.trail[self.trail.curr_idx].lit;
            self.trail.curr_idx += 1;
            self.stats.propagations += 1;

            let false_lit = lit.negated();
            let mut watchers = self.watched_literals.take(false_lit);
            let mut conflict = None;
            let mut i = 0;

            while i < watchers.len() {
                let c_ref = watchers[i];
                let clause = &mut self.cnf[c_ref];
                if clause[0] == false_lit {
                    clause.swap(0, 1);
                }

                let first = clause[0];
                let first_value = self.assignment.literal_value(first);
                if first_value == Some(true) {
                    i += 1;
                    continue;
                }

                if let Some(k) = (2..clause.len())
                    .find(|&k| self.assignment.literal_value(clause[k]) != Some(false))
                {
                    clause.swap(1, k);
                    let new_watch = clause[1];
                    self.watched_literals[new_watch].push(c_ref);
                    watchers.swap_remove(i);
                    continue;
                }

                if first_value == Some(false) {
                    conflict = Some(c_ref);
                    break;
                }

                self.trail
                    .push(&mut self.assignment, first, Reason::Clause(c_ref));
                i += 1;
            }

            self.watched_literals.restore(false_lit, watchers);
            if conflict.is_some() {
                return conflict;
            }
        }

        None
    }

    fn learn(&mut self, clause: Clause<C::Literal>, backjump: usize) {
        self.backtrack(backjump);
        self.stats.learnt_clauses += 1;
        let asserting = clause[0];
        trace!(len = clause.len(), backjump, "learnt clause");

        if clause.is_unit() {
            self.trail
                .push(&mut self.assignment, asserting, Reason::Unit);
            return;
        }

        let c_ref = self.cnf.len();
        self.cnf.add_clause(clause);
        self.watched_literals.add_clause(&self.cnf[c_ref], c_ref);
        self.trail
            .push(&mut self.assignment, asserting, Reason::Clause(c_ref));
    }

    fn decide(&mut self, var: Variable) {
        self.stats.decisions += 1;
        let polarity = self.phases.get_next(var);
        self.trail.new_decision_level();
        self.trail.push(
            &mut self.assignment,
            C::Literal::new(var, polarity),
            Reason::Decision,
        );
    }

    /// Searches for a model, giving up after `conflict_limit` conflicts in
    /// this call.
    pub fn solve_with_budget(&mut self, conflict_limit: Option<usize>) -> SolveResult {
        if self.unsat {
            return SolveResult::Unsat;
        }
        self.backtrack(0);

        let mut conflicts = 0_usize;
        loop {
            if let Some(c_ref) = self.propagate() {
                self.stats.conflicts += 1;
                conflicts += 1;

                let (conflict, to_bump) = analyse_conflict(&self.cnf, &self.trail, c_ref);
                match conflict {
                    Conflict::Ground => {
                        debug!(conflicts = self.stats.conflicts, "conflict at level 0");
                        self.unsat = true;
                        self.backtrack(0);
                        return SolveResult::Unsat;
                    }
                    Conflict::Learned { clause, backjump } => self.learn(clause, backjump),
                }

                self.selector.bumps(to_bump);
                self.selector.decay();

                if conflict_limit.is_some_and(|limit| conflicts >= limit) {
                    debug!(conflicts, "conflict budget exhausted");
                    self.backtrack(0);
                    return SolveResult::Unknown;
                }

                if self.restarter.should_restart() {
                    self.stats.restarts += 1;
                    trace!(restarts = self.stats.restarts, "restart");
                    self.backtrack(0);
                }
                continue;
            }

            match self.selector.pick(&self.assignment) {
                Some(var) => self.decide(var),
                None => {
                    let solutions = self.assignment.get_solutions();
                    self.backtrack(0);
                    return SolveResult::Sat(solutions);
                }
            }
        }
    }
}

impl<C: SolverConfig> Solver<C> for Cdcl<C> {
    fn new(cnf: Cnf<C::Literal>) -> Self {
        let mut solver = Self::empty();
        for clause in cnf.clauses {
            if !solver.add_clause(clause) {
                break;
            }
        }
        #[allow(clippy::cast_possible_truncation)]
        let max_var = cnf.num_vars.saturating_sub(1) as Variable;
        solver.ensure_var(max_var);
        solver
    }

    fn solve(&mut self) -> SolveResult {
        self.solve_with_budget(None)
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}
