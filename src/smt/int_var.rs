#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Bounded integer variables.
//!
//! Each variable `x` in `[lb, ub]` gets one literal `x = v` per value (the
//! direct encoding) and one literal `x >= k` per `k` in `lb + 1..=ub` (the
//! order encoding). Channelling clauses keep the two in step, so equality
//! constraints can use the direct literals while sums use the order ones.

use crate::sat::solver::Solutions;
use crate::smt::error::{SmtError, SmtResult};
use crate::smt::session::{Lit, Session};
use crate::sat::literal::Literal;

/// Handle to an integer variable declared in a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(pub(crate) usize);

impl IntVar {
    #[must_use]
    pub const fn id(self) -> usize {
        self.0
    }
}

/// Order literals of a bounded integer.
///
/// `ge[i]` stands for `x >= lb + 1 + i`; `x >= lb` is always true and
/// `x >= ub + 1` always false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEncoding {
    pub lb: i64,
    pub ub: i64,
    ge: Vec<Lit>,
}

impl OrderEncoding {
    /// Allocates the order literals and posts `x >= k + 1 -> x >= k`.
    pub(crate) fn new(session: &mut Session, lb: i64, ub: i64) -> SmtResult<Self> {
        if lb > ub {
            return Err(SmtError::EmptyDomain { lb, ub });
        }
        let ge = (lb + 1..=ub).map(|_| session.fresh_lit()).collect::<Vec<_>>();
        for pair in ge.windows(2) {
            session.add_clause([pair[1].negated(), pair[0]]);
        }
        Ok(Self { lb, ub, ge })
    }

    /// Literal for `x >= k`; constant outside `lb + 1..=ub`.
    #[must_use]
    pub fn ge(&self, truth: Lit, k: i64) -> Lit {
        if k <= self.lb {
            truth
        } else if k > self.ub {
            truth.negated()
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = (k - self.lb - 1) as usize;
            self.ge[idx]
        }
    }

    /// Number of values in the domain.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn size(&self) -> usize {
        (self.ub - self.lb + 1) as usize
    }
}

/// Direct and order literals of a declared integer variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntEncoding {
    pub order: OrderEncoding,
    eq: Vec<Lit>,
}

impl IntEncoding {
    pub(crate) fn new(session: &mut Session, lb: i64, ub: i64) -> SmtResult<Self> {
        let order = OrderEncoding::new(session, lb, ub)?;
        let eq = (lb..=ub).map(|_| session.fresh_lit()).collect::<Vec<_>>();
        let truth = session.truth();

        for (v, &eq_v) in (lb..=ub).zip(&eq) {
            let ge_v = order.ge(truth, v);
            let ge_next = order.ge(truth, v + 1);
            session.add_clause([eq_v.negated(), ge_v]);
            session.add_clause([eq_v.negated(), ge_next.negated()]);
            session.add_clause([ge_v.negated(), ge_next, eq_v]);
        }
        session.add_clause(eq.iter().copied());

        Ok(Self { order, eq })
    }

    #[must_use]
    pub const fn lb(&self) -> i64 {
        self.order.lb
    }

    #[must_use]
    pub const fn ub(&self) -> i64 {
        self.order.ub
    }

    /// Literal for `x == v`; false outside the domain.
    #[must_use]
    pub fn eq(&self, truth: Lit, v: i64) -> Lit {
        if v < self.lb() || v > self.ub() {
            truth.negated()
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = (v - self.lb()) as usize;
            self.eq[idx]
        }
    }

    #[must_use]
    pub fn ge(&self, truth: Lit, k: i64) -> Lit {
        self.order.ge(truth, k)
    }

    /// Reads the value back from a satisfying assignment.
    pub fn decode(&self, solutions: &Solutions) -> SmtResult<i64> {
        (self.lb()..=self.ub())
            .zip(&self.eq)
            .find(|&(_, &lit)| solutions.literal_value(lit) == Some(true))
            .map(|(v, _)| v)
            .ok_or_else(|| {
                SmtError::ModelError(format!(
                    "no value of [{}, {}] is selected",
                    self.lb(),
                    self.ub()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::smt::session::{CheckResult, EngineOptions, Session};

    #[test]
    fn test_domain_is_enumerated_exactly() {
        let mut session = Session::new(EngineOptions::default());
        let x = session.int_var(-2, 3).unwrap();
        let mut seen = Vec::new();
        while session.check().unwrap() == CheckResult::Sat {
            let model = session.model().unwrap().clone();
            let v = model.value(x).unwrap();
            seen.push(v);
            session.assert_differs(&model, &[x]).unwrap();
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![-2, -1, 0, 1, 2, 3]);
    }

    #[test]
    fn test_singleton_domain() {
        let mut session = Session::new(EngineOptions::default());
        let x = session.int_var(7, 7).unwrap();
        assert_eq!(session.check().unwrap(), CheckResult::Sat);
        assert_eq!(session.model().unwrap().value(x).unwrap(), 7);
    }

    #[test]
    fn test_empty_domain_rejected() {
        let mut session = Session::new(EngineOptions::default());
        assert!(session.int_var(3, 2).is_err());
    }
}
