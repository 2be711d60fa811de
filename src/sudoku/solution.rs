#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::smt::Model;
use crate::sudoku::constraints::{Variant, favoured};
use crate::sudoku::error::{SudokuError, SudokuResult};
use crate::sudoku::grid::Grid;
use crate::sudoku::puzzle::{Puzzle, Size, value_symbol};
use itertools::{Itertools, iproduct};
use std::fmt::Display;

/// A filled grid read back from a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    size: Size,
    values: Vec<u8>,
}

/// A rule a candidate solution breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    OutOfRange { row: usize, col: usize, value: u8 },
    Repeated { unit: &'static str, index: usize },
    Given { row: usize, col: usize, expected: u8, found: u8 },
    Parity { row: usize, favoured: u32, other: u32 },
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { row, col, value } => {
                write!(f, "cell ({row}, {col}) holds {value}, outside the domain")
            }
            Self::Repeated { unit, index } => write!(f, "{unit} {index} repeats a value"),
            Self::Given {
                row,
                col,
                expected,
                found,
            } => write!(f, "cell ({row}, {col}) was given {expected} but holds {found}"),
            Self::Parity {
                row,
                favoured,
                other,
            } => write!(f, "row {row}: parity sums {favoured} <= {other}"),
        }
    }
}

impl Solution {
    pub fn new(size: Size, values: Vec<u8>) -> SudokuResult<Self> {
        if values.len() != size.cells() {
            return Err(SudokuError::malformed(
                0,
                format!("expected {} values, found {}", size.cells(), values.len()),
            ));
        }
        Ok(Self { size, values })
    }

    /// Reads the cell values of `grid` out of `model`.
    pub fn from_model(model: &Model, grid: &Grid) -> SudokuResult<Self> {
        let values = grid
            .cells()
            .iter()
            .map(|&cell| {
                let v = model.value(cell)?;
                u8::try_from(v)
                    .map_err(|_| SudokuError::EngineFailure(format!("cell value {v} out of range")))
            })
            .collect::<SudokuResult<Vec<_>>>()?;
        Self::new(grid.size(), values)
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> u8 {
        self.values[row * self.size.side() + col]
    }

    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// The solution as a puzzle with every cell given.
    #[must_use]
    pub fn to_puzzle(&self) -> Puzzle {
        Puzzle::from_cells(self.size, self.values.iter().copied().map(Some).collect())
    }

    /// Sums of the favoured and the other cells of `row`.
    #[must_use]
    pub fn parity_sums(&self, row: usize) -> (u32, u32) {
        (0..self.size.side()).fold((0, 0), |(fav, other), col| {
            let v = u32::from(self.value(row, col));
            if favoured(row, col) {
                (fav + v, other)
            } else {
                (fav, other + v)
            }
        })
    }

    /// Checks the filled grid against the rules without the engine.
    #[must_use]
    pub fn verify(&self, puzzle: &Puzzle, variant: Variant) -> Vec<Violation> {
        let side = self.size.side();
        let b = self.size.block_size();
        let mut violations = Vec::new();

        for (row, col) in iproduct!(0..side, 0..side) {
            let value = self.value(row, col);
            if value == 0 || usize::from(value) > side {
                violations.push(Violation::OutOfRange { row, col, value });
            }
        }

        let repeats = |cells: Vec<u8>| !cells.iter().all_unique();
        for i in 0..side {
            if repeats((0..side).map(|c| self.value(i, c)).collect()) {
                violations.push(Violation::Repeated { unit: "row", index: i });
            }
            if repeats((0..side).map(|r| self.value(r, i)).collect()) {
                violations.push(Violation::Repeated {
                    unit: "column",
                    index: i,
                });
            }
            let (br, bc) = ((i / b) * b, (i % b) * b);
            let block = iproduct!(br..br + b, bc..bc + b)
                .map(|(r, c)| self.value(r, c))
                .collect();
            if repeats(block) {
                violations.push(Violation::Repeated {
                    unit: "block",
                    index: i,
                });
            }
        }

        for (row, col, expected) in puzzle.givens() {
            let found = self.value(row, col);
            if found != expected {
                violations.push(Violation::Given {
                    row,
                    col,
                    expected,
                    found,
                });
            }
        }

        if variant == Variant::Advanced {
            for row in 0..side {
                let (favoured, other) = self.parity_sums(row);
                if favoured <= other {
                    violations.push(Violation::Parity {
                        row,
                        favoured,
                        other,
                    });
                }
            }
        }

        violations
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &v in &self.values {
            write!(f, "{}", value_symbol(v).unwrap_or('?'))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
    const CLASSIC: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    fn solution(text: &str) -> Solution {
        let puzzle = Puzzle::parse(text, Size::Nine, 1).unwrap();
        let values = puzzle.cells().iter().map(|c| c.unwrap_or(0)).collect();
        Solution::new(Size::Nine, values).unwrap()
    }

    #[test]
    fn test_valid_basic_solution() {
        let puzzle = Puzzle::parse(CLASSIC, Size::Nine, 1).unwrap();
        let s = solution(SOLVED);
        assert!(s.verify(&puzzle, Variant::Basic).is_empty());
        assert_eq!(s.to_string(), SOLVED);
        assert_eq!(s.to_puzzle().to_string(), SOLVED);
    }

    #[test]
    fn test_parity_is_only_checked_for_advanced() {
        let puzzle = Puzzle::parse(CLASSIC, Size::Nine, 1).unwrap();
        let s = solution(SOLVED);
        // row 0: 5 + 4 + 7 + 9 + 2 = 27 against 3 + 6 + 8 + 1 = 18
        assert_eq!(s.parity_sums(0), (27, 18));
        let violations = s.verify(&puzzle, Variant::Advanced);
        assert!(!violations.is_empty());
        assert!(
            violations
                .iter()
                .all(|v| matches!(v, Violation::Parity { .. }))
        );
    }

    #[test]
    fn test_detects_broken_rules() {
        let puzzle = Puzzle::parse(CLASSIC, Size::Nine, 1).unwrap();
        let mut text = SOLVED.to_string();
        text.replace_range(0..2, "35");
        let violations = solution(&text).verify(&puzzle, Variant::Basic);
        assert!(violations.contains(&Violation::Given {
            row: 0,
            col: 0,
            expected: 5,
            found: 3
        }));
        assert!(violations.contains(&Violation::Repeated {
            unit: "column",
            index: 0
        }));
        assert!(!violations.contains(&Violation::Repeated {
            unit: "block",
            index: 0
        }));
    }
}
