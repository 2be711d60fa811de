#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sudoku::error::{SudokuError, SudokuResult};
use crate::sudoku::puzzle::{PLACEHOLDER, Size};
use itertools::Itertools;

/// Lays a puzzle or solution string out as a grid.
///
/// Unknown cells show as `-`; cells are separated by one space, one row per
/// line.
pub fn render_grid(cells: &str, block_size: usize) -> SudokuResult<String> {
    let size = Size::from_block_size(block_size)?;
    let chars = cells.chars().collect::<Vec<_>>();
    if chars.len() != size.cells() {
        return Err(SudokuError::malformed(
            0,
            format!("cannot render {} cells as a {}x{} grid", chars.len(), size.side(), size.side()),
        ));
    }

    Ok(chars
        .chunks(size.side())
        .map(|row| {
            row.iter()
                .map(|&c| if c == PLACEHOLDER { '-' } else { c })
                .join(" ")
        })
        .join("\n"))
}
