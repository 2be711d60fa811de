#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sudoku::error::{SudokuError, SudokuResult};
use std::fmt::Display;

/// Marks an unknown cell in the textual form.
pub const PLACEHOLDER: char = '.';

/// Grid dimension, i.e. the square of the block size.
#[derive(Debug, Clone, PartialEq, Eq, Copy, PartialOrd, Ord, Hash, Default)]
pub enum Size {
    Four = 4,
    #[default]
    Nine = 9,
    Sixteen = 16,
    TwentyFive = 25,
}

impl TryFrom<usize> for Size {
    type Error = SudokuError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(SudokuError::InvalidBlockSize(value.isqrt())),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        size as Self
    }
}

impl Size {
    pub fn from_block_size(block_size: usize) -> SudokuResult<Self> {
        match block_size {
            2 => Ok(Self::Four),
            3 => Ok(Self::Nine),
            4 => Ok(Self::Sixteen),
            5 => Ok(Self::TwentyFive),
            _ => Err(SudokuError::InvalidBlockSize(block_size)),
        }
    }

    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn side(self) -> usize {
        self as usize
    }

    /// Number of characters in a puzzle line.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.side() * self.side()
    }
}

/// `1`-`9` then `A`-`Z`, so `'A'` is 10.
#[must_use]
pub fn symbol_value(c: char) -> Option<u8> {
    match c {
        '1'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

#[must_use]
pub fn value_symbol(v: u8) -> Option<char> {
    match v {
        1..=9 => Some(char::from(b'0' + v)),
        10..=35 => Some(char::from(b'A' + v - 10)),
        _ => None,
    }
}

/// A validated puzzle: one entry per cell in row-major order, `None` for
/// unknown cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    size: Size,
    cells: Vec<Option<u8>>,
}

impl Puzzle {
    /// Parses one puzzle line. `line` is only used for error reporting.
    ///
    /// Surrounding whitespace is ignored. The length must be exactly
    /// `size.cells()` and every character must be the placeholder or a symbol
    /// for a value in `1..=size.side()`.
    pub fn parse(text: &str, size: Size, line: usize) -> SudokuResult<Self> {
        let text = text.trim();
        let len = text.chars().count();
        if len != size.cells() {
            return Err(SudokuError::malformed(
                line,
                format!(
                    "expected {} cells for block size {}, found {len}",
                    size.cells(),
                    size.block_size()
                ),
            ));
        }

        let cells = text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if c == PLACEHOLDER {
                    return Ok(None);
                }
                match symbol_value(c) {
                    Some(v) if usize::from(v) <= size.side() => Ok(Some(v)),
                    _ => Err(SudokuError::malformed(
                        line,
                        format!("invalid symbol {c:?} at position {}", i + 1),
                    )),
                }
            })
            .collect::<SudokuResult<Vec<_>>>()?;

        Ok(Self { size, cells })
    }

    /// Builds a puzzle from already validated cells.
    pub(crate) const fn from_cells(size: Size, cells: Vec<Option<u8>>) -> Self {
        Self { size, cells }
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.cells[row * self.size.side() + col]
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<u8>] {
        &self.cells
    }

    /// `(row, col, value)` of every given cell.
    pub fn givens(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let side = self.size.side();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|v| (i / side, i % side, v)))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            let c = cell.and_then(value_symbol).unwrap_or(PLACEHOLDER);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_parse_classic() {
        let puzzle = Puzzle::parse(CLASSIC, Size::Nine, 1).unwrap();
        assert_eq!(puzzle.cell(0, 0), Some(5));
        assert_eq!(puzzle.cell(0, 2), None);
        assert_eq!(puzzle.cell(8, 8), Some(9));
        assert_eq!(puzzle.givens().count(), 30);
        assert_eq!(puzzle.to_string(), CLASSIC);
    }

    #[test]
    fn test_trailing_whitespace_ignored() {
        let line = format!("{CLASSIC}\r\n");
        assert!(Puzzle::parse(&line, Size::Nine, 1).is_ok());
    }

    #[test]
    fn test_wrong_length() {
        let err = Puzzle::parse(&CLASSIC[..80], Size::Nine, 7).unwrap_err();
        assert!(matches!(err, SudokuError::MalformedPuzzle { line: 7, .. }));
        assert!(Puzzle::parse("", Size::Nine, 1).is_err());
    }

    #[test]
    fn test_symbol_out_of_range() {
        assert!(Puzzle::parse("1234341221434321", Size::Four, 1).is_ok());
        assert!(Puzzle::parse("1234341221434329", Size::Four, 1).is_err());
        assert!(Puzzle::parse("12343412214343x1", Size::Four, 1).is_err());
        assert!(Puzzle::parse("0234341221434321", Size::Four, 1).is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(symbol_value('9'), Some(9));
        assert_eq!(symbol_value('A'), Some(10));
        assert_eq!(symbol_value('P'), Some(25));
        assert_eq!(symbol_value('0'), None);
        assert_eq!(value_symbol(16), Some('G'));
        assert_eq!(value_symbol(0), None);
        assert!((1..=35).all(|v| value_symbol(v).and_then(symbol_value) == Some(v)));
    }

    #[test]
    fn test_block_sizes() {
        assert_eq!(Size::from_block_size(3).unwrap(), Size::Nine);
        assert_eq!(Size::TwentyFive.cells(), 625);
        assert!(matches!(
            Size::from_block_size(6),
            Err(SudokuError::InvalidBlockSize(6))
        ));
    }
}
