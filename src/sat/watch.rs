#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause::Clause;
use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

pub type WatchList = SmallVec<[usize; 6]>;

/// For every literal, the clauses currently watching it.
///
/// A clause at index `i` is listed under its literals at positions `0` and
/// `1`; the list for `l` is visited when `l` becomes false.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedLiterals(Vec<WatchList>);

impl WatchedLiterals {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![SmallVec::new(); num_vars.max(1) * 2])
    }

    pub fn grow(&mut self) {
        self.0.push(SmallVec::new());
        self.0.push(SmallVec::new());
    }

    pub fn add_clause<L: Literal>(&mut self, clause: &Clause<L>, idx: usize) {
        let a = clause[0];
        let b = clause[1];

        debug_assert_ne!(a, b);

        self[a].push(idx);
        self[b].push(idx);
    }

    /// Detaches the list for `lit` so it can be rewritten while clauses move.
    pub fn take<L: Literal>(&mut self, lit: L) -> WatchList {
        std::mem::take(&mut self[lit])
    }

    pub fn restore<L: Literal>(&mut self, lit: L, list: WatchList) {
        self[lit] = list;
    }
}

impl<L: Literal> Index<L> for WatchedLiterals {
    type Output = WatchList;

    fn index(&self, index: L) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl<L: Literal> IndexMut<L> for WatchedLiterals {
    fn index_mut(&mut self, index: L) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::DoubleLiteral;

    #[test]
    fn test_watches_first_two_literals() {
        let mut watches = WatchedLiterals::new(4);
        let clause: Clause<DoubleLiteral> = Clause::new(&[1, -2, 3]);
        watches.add_clause(&clause, 0);

        assert_eq!(watches[DoubleLiteral::from_i32(1)].as_slice(), &[0]);
        assert_eq!(watches[DoubleLiteral::from_i32(-2)].as_slice(), &[0]);
        assert!(watches[DoubleLiteral::from_i32(3)].is_empty());
        assert!(watches[DoubleLiteral::from_i32(2)].is_empty());
    }

    #[test]
    fn test_take_and_restore() {
        let mut watches = WatchedLiterals::new(3);
        let clause: Clause<DoubleLiteral> = Clause::new(&[1, 2]);
        watches.add_clause(&clause, 5);

        let lit = DoubleLiteral::from_i32(2);
        let list = watches.take(lit);
        assert!(watches[lit].is_empty());
        watches.restore(lit, list);
        assert_eq!(watches[lit].as_slice(), &[5]);
    }
}
