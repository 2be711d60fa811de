#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Linear inequalities `sum(a_i * x_i) >= c`.
//!
//! The sum is built left to right as a chain of partial sums, each a fresh
//! order-encoded integer `z = s + t`. Only `z <= s + t` is posted, which is
//! all a lower bound on the final partial sum needs:
//!
//! `s >= a + 1  or  t >= b + 1  or  not z >= a + b + 1`
//!
//! for every `a` in the range of `s` and `b` in the range of `t`.

use crate::sat::literal::Literal;
use crate::smt::error::SmtResult;
use crate::smt::int_var::{IntEncoding, IntVar, OrderEncoding};
use crate::smt::session::{Lit, Session};

fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    -div_floor(-a, b)
}

/// One operand of a partial sum, viewed through its `>=` literals.
#[derive(Debug, Clone)]
enum Summand {
    Scaled { coef: i64, var: IntEncoding },
    Partial(OrderEncoding),
}

impl Summand {
    fn bounds(&self) -> (i64, i64) {
        match self {
            Self::Scaled { coef, var } if *coef > 0 => (coef * var.lb(), coef * var.ub()),
            Self::Scaled { coef, var } => (coef * var.ub(), coef * var.lb()),
            Self::Partial(z) => (z.lb, z.ub),
        }
    }

    fn ge(&self, truth: Lit, k: i64) -> Lit {
        match self {
            Self::Scaled { coef, var } if *coef > 0 => var.ge(truth, div_ceil(k, *coef)),
            // a * x >= k  <=>  x <= floor(k / a)  for a < 0
            Self::Scaled { coef, var } => var.ge(truth, div_floor(k, *coef) + 1).negated(),
            Self::Partial(z) => z.ge(truth, k),
        }
    }
}

impl Session {
    /// Posts `sum(coef * var) >= rhs`. Zero coefficients are ignored.
    pub fn assert_linear_ge(&mut self, terms: &[(i64, IntVar)], rhs: i64) -> SmtResult<()> {
        let mut summands = terms
            .iter()
            .filter(|(coef, _)| *coef != 0)
            .map(|&(coef, var)| {
                Ok(Summand::Scaled {
                    coef,
                    var: self.encoding(var)?.clone(),
                })
            })
            .collect::<SmtResult<Vec<_>>>()?
            .into_iter();

        let truth = self.truth();
        let Some(mut acc) = summands.next() else {
            if rhs > 0 {
                self.add_clause(Vec::new());
            }
            return Ok(());
        };

        for t in summands {
            let (ls, us) = acc.bounds();
            let (lt, ut) = t.bounds();
            let z = OrderEncoding::new(self, ls + lt, us + ut)?;
            for a in ls..=us {
                for b in lt..=ut {
                    self.add_clause([
                        acc.ge(truth, a + 1),
                        t.ge(truth, b + 1),
                        z.ge(truth, a + b + 1).negated(),
                    ]);
                }
            }
            acc = Summand::Partial(z);
        }

        let lit = acc.ge(truth, rhs);
        self.add_clause([lit]);
        Ok(())
    }
}
