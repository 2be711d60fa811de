#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::smt::{IntVar, Session, SmtResult};
use crate::sudoku::puzzle::Size;
use itertools::iproduct;

/// One integer variable per cell, row-major, each ranging over `1..=side`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: Size,
    cells: Vec<IntVar>,
}

impl Grid {
    /// Declares the cell variables in `session`.
    pub fn declare(session: &mut Session, size: Size) -> SmtResult<Self> {
        #[allow(clippy::cast_possible_wrap)]
        let side = size.side() as i64;
        let cells = (0..size.cells())
            .map(|_| session.int_var(1, side))
            .collect::<SmtResult<Vec<_>>>()?;
        Ok(Self { size, cells })
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> IntVar {
        self.cells[row * self.size.side() + col]
    }

    #[must_use]
    pub fn cells(&self) -> &[IntVar] {
        &self.cells
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Vec<IntVar> {
        (0..self.size.side()).map(|c| self.cell(row, c)).collect()
    }

    #[must_use]
    pub fn col(&self, col: usize) -> Vec<IntVar> {
        (0..self.size.side()).map(|r| self.cell(r, col)).collect()
    }

    /// Cells of the block whose top-left corner is `(row, col)`.
    #[must_use]
    pub fn block(&self, row: usize, col: usize) -> Vec<IntVar> {
        let b = self.size.block_size();
        iproduct!(row..row + b, col..col + b)
            .map(|(r, c)| self.cell(r, c))
            .collect()
    }

    /// Every row, column and block, in that order.
    #[must_use]
    pub fn units(&self) -> Vec<Vec<IntVar>> {
        let side = self.size.side();
        let b = self.size.block_size();
        let rows = (0..side).map(|r| self.row(r));
        let cols = (0..side).map(|c| self.col(c));
        let blocks = iproduct!((0..side).step_by(b), (0..side).step_by(b))
            .map(|(r, c)| self.block(r, c));
        rows.chain(cols).chain(blocks).collect()
    }
}
