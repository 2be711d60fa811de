#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use core::ops::{Index, IndexMut};
use itertools::Itertools;
use smallvec::SmallVec;

/// A disjunction of literals.
///
/// While a clause is attached to the solver, positions `0` and `1` hold the
/// watched literals; for a reason clause position `0` is the implied literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause<L: Literal> {
    pub literals: SmallVec<[L; 8]>,
    pub learnt: bool,
}

impl<L: Literal> Clause<L> {
    pub fn new(literals: &[i32]) -> Self {
        literals.iter().copied().map(L::from_i32).collect()
    }

    #[must_use]
    pub fn into_learnt(mut self) -> Self {
        self.learnt = true;
        self
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.literals.swap(i, j);
    }

    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Contains a literal together with its complement.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_combinations()
            .any(|(a, b)| a.variable() == b.variable() && a.polarity() != b.polarity())
    }

    /// Sorts and removes repeated literals.
    pub fn normalise(&mut self) {
        self.literals.sort_unstable();
        self.literals.dedup();
    }
}

impl<L: Literal> Index<usize> for Clause<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal> IndexMut<usize> for Clause<L> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}

impl<L: Literal> FromIterator<L> for Clause<L> {
    fn from_iter<T: IntoIterator<Item = L>>(iter: T) -> Self {
        Self {
            literals: iter.into_iter().collect(),
            learnt: false,
        }
    }
}

impl<L: Literal> From<Vec<L>> for Clause<L> {
    fn from(literals: Vec<L>) -> Self {
        literals.into_iter().collect()
    }
}

impl<L: Literal> From<Vec<i32>> for Clause<L> {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(&literals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::DoubleLiteral;

    #[test]
    fn test_new() {
        let clause: Clause<DoubleLiteral> = Clause::new(&[1, 2, 3]);
        assert_eq!(clause.len(), 3);
        assert!(!clause.learnt);
    }

    #[test]
    fn test_swap() {
        let mut clause: Clause<DoubleLiteral> = Clause::new(&[1, 2, 3]);
        clause.swap(0, 2);
        assert_eq!(clause[0], DoubleLiteral::from_i32(3));
        assert_eq!(clause[1], DoubleLiteral::from_i32(2));
        assert_eq!(clause[2], DoubleLiteral::from_i32(1));
    }

    #[test]
    fn test_tautology() {
        let clause: Clause<DoubleLiteral> = Clause::new(&[1, -2, 2]);
        assert!(clause.is_tautology());
        let clause: Clause<DoubleLiteral> = Clause::new(&[1, -2, 3]);
        assert!(!clause.is_tautology());
    }

    #[test]
    fn test_normalise_dedups() {
        let mut clause: Clause<DoubleLiteral> = Clause::new(&[3, 1, 3, -2, 1]);
        clause.normalise();
        assert_eq!(clause.len(), 3);
    }
}
