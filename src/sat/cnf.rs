#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause::Clause;
use crate::sat::literal::{DoubleLiteral, Literal};
use crate::sat::solver::Solutions;
use core::ops::{Index, IndexMut};
use std::fmt::Display;

/// A clause database.
///
/// `num_vars` is one past the largest variable, matching the 1-based
/// variable numbering; `non_learnt_idx` counts the clauses that were given
/// rather than learnt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf<L: Literal = DoubleLiteral> {
    pub clauses: Vec<Clause<L>>,
    pub num_vars: usize,
    pub non_learnt_idx: usize,
}

impl<L: Literal> Cnf<L> {
    pub fn new(clauses: Vec<Vec<i32>>) -> Self {
        let mut cnf = Self {
            clauses: Vec::with_capacity(clauses.len()),
            num_vars: 1,
            non_learnt_idx: 0,
        };
        for clause in clauses {
            cnf.add_clause(Clause::from(clause));
        }
        cnf
    }

    pub fn add_clause(&mut self, clause: Clause<L>) {
        if let Some(max) = clause.iter().map(|l| l.variable() as usize).max() {
            self.num_vars = self.num_vars.max(max + 1);
        }
        if !clause.learnt {
            self.non_learnt_idx += 1;
        }
        self.clauses.push(clause);
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause<L>> {
        self.clauses.iter()
    }

    /// Number of literal occurrences over the given (non-learnt) clauses.
    pub fn num_literals(&self) -> usize {
        self.iter().filter(|c| !c.learnt).map(Clause::len).sum()
    }

    /// Checks every given clause has a literal satisfied by `solutions`.
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.iter()
            .filter(|c| !c.learnt)
            .all(|c| c.iter().any(|l| solutions.check(l.to_i32())))
    }
}

impl<L: Literal> Index<usize> for Cnf<L> {
    type Output = Clause<L>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl<L: Literal> IndexMut<usize> for Cnf<L> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.clauses[index]
    }
}

impl<L: Literal> From<Vec<Vec<i32>>> for Cnf<L> {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

/// DIMACS rendering of the given clauses; learnt clauses are left out.
impl<L: Literal> Display for Cnf<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "p cnf {} {}",
            self.num_vars.saturating_sub(1),
            self.non_learnt_idx
        )?;
        for clause in self.iter().filter(|c| !c.learnt) {
            for lit in clause.iter() {
                write!(f, "{} ", lit.to_i32())?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_vars_tracks_largest_variable() {
        let cnf: Cnf = Cnf::new(vec![vec![1, -4], vec![2, 3]]);
        assert_eq!(cnf.num_vars, 5);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.non_learnt_idx, 2);
        assert_eq!(cnf.num_literals(), 4);
    }

    #[test]
    fn test_dimacs_output() {
        let cnf: Cnf = Cnf::new(vec![vec![1, -2], vec![2]]);
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }

    #[test]
    fn test_learnt_clauses_are_not_exported() {
        let mut cnf: Cnf = Cnf::new(vec![vec![1, 2]]);
        cnf.add_clause(Clause::new(&[-1]).into_learnt());
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.to_string(), "p cnf 2 1\n1 2 0\n");
    }

    #[test]
    fn test_verify() {
        let cnf: Cnf = Cnf::new(vec![vec![1, 2], vec![-1]]);
        assert!(cnf.verify(&Solutions::new(&[-1, 2])));
        assert!(!cnf.verify(&Solutions::new(&[1, 2])));
    }
}
