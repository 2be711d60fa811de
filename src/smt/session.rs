#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::cdcl::Cdcl;
use crate::sat::clause::Clause;
use crate::sat::literal::{DoubleLiteral, Literal};
use crate::sat::restarter::RestarterType;
use crate::sat::solver::{DynamicConfig, SolutionStats, SolveResult, Solver};
use crate::sat::variable_selection::VariableSelectionType;
use crate::smt::error::{SmtError, SmtResult};
use crate::smt::int_var::{IntEncoding, IntVar};
use crate::smt::model::Model;
use tracing::debug;

pub type Lit = DoubleLiteral;

/// Heuristics and limits for the underlying SAT search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    pub restart: RestarterType,
    pub selection: VariableSelectionType,
    /// Conflicts allowed per `check`; `None` searches to completion.
    pub conflict_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Sat,
    Unsat,
    /// The engine gave up; carries the reason.
    Unknown(String),
}

/// One incremental constraint problem over bounded integers.
///
/// Constraints only ever accumulate. After a satisfiable [`Session::check`]
/// the model stays readable until the next `check`.
#[derive(Debug, Clone)]
pub struct Session {
    solver: Cdcl<DynamicConfig>,
    ints: Vec<IntEncoding>,
    /// Asserted true at level 0; its negation is the false constant.
    truth: Lit,
    model: Option<Model>,
    options: EngineOptions,
}

impl Session {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let mut solver: Cdcl<DynamicConfig> = Cdcl::from_parts(
            options.selection.to_impl(1),
            options.restart.to_impl(),
        );
        let truth = Lit::new(solver.new_var(), true);
        solver.add_clause(Clause::from(vec![truth]));
        Self {
            solver,
            ints: Vec::new(),
            truth,
            model: None,
            options,
        }
    }

    #[must_use]
    pub const fn truth(&self) -> Lit {
        self.truth
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub(crate) fn fresh_lit(&mut self) -> Lit {
        Lit::new(self.solver.new_var(), true)
    }

    /// Adds a clause, folding the true and false constants away.
    pub fn add_clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        let falsity = self.truth.negated();
        let mut clause = Vec::new();
        for lit in lits {
            if lit == self.truth {
                return;
            }
            if lit != falsity {
                clause.push(lit);
            }
        }
        self.solver.add_clause(Clause::from(clause));
    }

    /// Declares an integer variable ranging over `lb..=ub`.
    pub fn int_var(&mut self, lb: i64, ub: i64) -> SmtResult<IntVar> {
        let encoding = IntEncoding::new(self, lb, ub)?;
        self.ints.push(encoding);
        Ok(IntVar(self.ints.len() - 1))
    }

    pub(crate) fn encoding(&self, var: IntVar) -> SmtResult<&IntEncoding> {
        self.ints
            .get(var.0)
            .ok_or_else(|| SmtError::UnknownVariable(format!("#{}", var.0)))
    }

    /// `x == v`
    pub fn eq_lit(&self, var: IntVar, v: i64) -> SmtResult<Lit> {
        Ok(self.encoding(var)?.eq(self.truth, v))
    }

    /// `x >= k`
    pub fn ge_lit(&self, var: IntVar, k: i64) -> SmtResult<Lit> {
        Ok(self.encoding(var)?.ge(self.truth, k))
    }

    pub fn assert_eq(&mut self, var: IntVar, v: i64) -> SmtResult<()> {
        let lit = self.eq_lit(var, v)?;
        self.add_clause([lit]);
        Ok(())
    }

    /// Pairwise distinct values.
    ///
    /// When the variables share one domain whose size equals their number,
    /// every value must also be taken by some variable.
    pub fn assert_distinct(&mut self, vars: &[IntVar]) -> SmtResult<()> {
        let encodings = vars
            .iter()
            .map(|&v| self.encoding(v).cloned())
            .collect::<SmtResult<Vec<_>>>()?;
        let Some(lb) = encodings.iter().map(IntEncoding::lb).min() else {
            return Ok(());
        };
        let ub = encodings.iter().map(IntEncoding::ub).max().unwrap_or(lb);
        let permutation = encodings
            .iter()
            .all(|e| e.lb() == lb && e.ub() == ub && e.order.size() == vars.len());

        let falsity = self.truth.negated();
        for v in lb..=ub {
            let lits = encodings
                .iter()
                .map(|e| e.eq(self.truth, v))
                .filter(|&l| l != falsity)
                .collect::<Vec<_>>();
            for (i, &a) in lits.iter().enumerate() {
                for &b in &lits[i + 1..] {
                    self.add_clause([a.negated(), b.negated()]);
                }
            }
            if permutation {
                self.add_clause(lits);
            }
        }
        Ok(())
    }

    /// Requires at least one of `vars` to differ from its value in `model`.
    pub fn assert_differs(&mut self, model: &Model, vars: &[IntVar]) -> SmtResult<()> {
        let lits = vars
            .iter()
            .map(|&var| Ok(self.eq_lit(var, model.value(var)?)?.negated()))
            .collect::<SmtResult<Vec<_>>>()?;
        self.add_clause(lits);
        Ok(())
    }

    /// Runs the search under the session's conflict limit.
    pub fn check(&mut self) -> SmtResult<CheckResult> {
        debug!(
            vars = self.solver.num_vars(),
            clauses = self.solver.cnf().len(),
            ints = self.ints.len(),
            "checking session"
        );
        self.model = None;
        match self.solver.solve_with_budget(self.options.conflict_limit) {
            SolveResult::Sat(solutions) => {
                let values = self
                    .ints
                    .iter()
                    .map(|e| e.decode(&solutions))
                    .collect::<SmtResult<Vec<_>>>()?;
                self.model = Some(Model::new(values));
                Ok(CheckResult::Sat)
            }
            SolveResult::Unsat => Ok(CheckResult::Unsat),
            SolveResult::Unknown => Ok(CheckResult::Unknown(format!(
                "conflict limit of {} reached",
                self.options.conflict_limit.unwrap_or_default()
            ))),
        }
    }

    pub fn model(&self) -> SmtResult<&Model> {
        self.model.as_ref().ok_or(SmtError::NoModel)
    }

    #[must_use]
    pub fn stats(&self) -> SolutionStats {
        self.solver.stats()
    }

    #[must_use]
    pub fn num_sat_vars(&self) -> usize {
        self.solver.num_vars()
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.solver.cnf().len()
    }

    /// The clauses posted so far, in DIMACS form.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        self.solver.cnf().to_string()
    }
}
