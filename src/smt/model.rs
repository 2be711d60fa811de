#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::smt::error::{SmtError, SmtResult};
use crate::smt::int_var::IntVar;

/// Integer values of one satisfying assignment, indexed by [`IntVar`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    values: Vec<i64>,
}

impl Model {
    #[must_use]
    pub const fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    pub fn value(&self, var: IntVar) -> SmtResult<i64> {
        self.values
            .get(var.id())
            .copied()
            .ok_or_else(|| SmtError::UnknownVariable(format!("#{}", var.id())))
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntVar, i64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (IntVar(i), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
