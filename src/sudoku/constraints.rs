#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku rules as integer constraints.
//!
//! The base rules are the cell domains (carried by the grid declaration),
//! all-distinct rows, columns and blocks, and the given cells. The advanced
//! variant adds, for every 0-indexed row `i`,
//!
//! `sum(cell(i, j) for (i + j) even) > sum(cell(i, j) for (i + j) odd)`
//!
//! which is the 1-indexed "even rows favour even columns, odd rows favour odd
//! columns" rule.

use crate::smt::{IntVar, Session, SmtResult};
use crate::sudoku::grid::Grid;
use crate::sudoku::puzzle::Puzzle;
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Variant {
    #[default]
    Basic,
    /// Base rules plus the row parity sums.
    Advanced,
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Whether the cell at `(row, col)` counts on the larger side of its row's sum.
#[must_use]
pub const fn favoured(row: usize, col: usize) -> bool {
    (row + col) % 2 == 0
}

/// Distinct units and given cells. Unknown cells post nothing.
pub fn apply_base(session: &mut Session, grid: &Grid, puzzle: &Puzzle) -> SmtResult<()> {
    for unit in grid.units() {
        session.assert_distinct(&unit)?;
    }
    for (row, col, value) in puzzle.givens() {
        session.assert_eq(grid.cell(row, col), i64::from(value))?;
    }
    debug!(
        clauses = session.num_clauses(),
        givens = puzzle.givens().count(),
        "base constraints posted"
    );
    Ok(())
}

/// `+1` for favoured cells and `-1` for the others, so the row rule reads
/// `sum >= 1`.
#[must_use]
pub fn parity_terms(grid: &Grid, row: usize) -> Vec<(i64, IntVar)> {
    grid.row(row)
        .into_iter()
        .enumerate()
        .map(|(col, cell)| (if favoured(row, col) { 1 } else { -1 }, cell))
        .collect()
}

pub fn apply_parity(session: &mut Session, grid: &Grid) -> SmtResult<()> {
    for row in 0..grid.size().side() {
        session.assert_linear_ge(&parity_terms(grid, row), 1)?;
    }
    debug!(clauses = session.num_clauses(), "parity constraints posted");
    Ok(())
}

pub fn apply(session: &mut Session, grid: &Grid, puzzle: &Puzzle, variant: Variant) -> SmtResult<()> {
    apply_base(session, grid, puzzle)?;
    if variant == Variant::Advanced {
        apply_parity(session, grid)?;
    }
    Ok(())
}
