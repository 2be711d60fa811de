#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sudoku::error::{SudokuError, SudokuResult};
use crate::sudoku::puzzle::{Puzzle, Size};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads puzzles one line at a time.
#[derive(Debug)]
pub struct PuzzleSource<R: BufRead> {
    reader: R,
    size: Size,
    line: usize,
    buf: String,
}

impl<R: BufRead> PuzzleSource<R> {
    pub const fn new(reader: R, size: Size) -> Self {
        Self {
            reader,
            size,
            line: 0,
            buf: String::new(),
        }
    }

    /// Reads and validates the next line.
    ///
    /// A malformed line is still consumed, so the following call moves on to
    /// the next line.
    ///
    /// # Errors
    ///
    /// `ExhaustedSource` at end of input, `MalformedPuzzle` for a bad line
    /// and `Io` when reading fails.
    pub fn next_puzzle(&mut self) -> SudokuResult<Puzzle> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(SudokuError::ExhaustedSource);
        }
        self.line += 1;
        Puzzle::parse(&self.buf, self.size, self.line)
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }
}

impl PuzzleSource<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>, size: Size) -> SudokuResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), size))
    }
}

/// Yields every line's result and stops at the end of input.
impl<R: BufRead> Iterator for PuzzleSource<R> {
    type Item = SudokuResult<Puzzle>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_puzzle() {
            Err(SudokuError::ExhaustedSource) => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_in_order() {
        let input = "1234341221434321\n................\n";
        let mut source = PuzzleSource::new(Cursor::new(input), Size::Four);
        assert_eq!(source.next_puzzle().unwrap().to_string(), "1234341221434321");
        assert_eq!(source.next_puzzle().unwrap().to_string(), "................");
        assert!(matches!(
            source.next_puzzle(),
            Err(SudokuError::ExhaustedSource)
        ));
    }

    #[test]
    fn test_malformed_line_is_skippable() {
        let input = "123\n\n................";
        let mut source = PuzzleSource::new(Cursor::new(input), Size::Four);
        assert!(matches!(
            source.next_puzzle(),
            Err(SudokuError::MalformedPuzzle { line: 1, .. })
        ));
        assert!(matches!(
            source.next_puzzle(),
            Err(SudokuError::MalformedPuzzle { line: 2, .. })
        ));
        assert!(source.next_puzzle().is_ok());
        assert_eq!(source.line(), 3);
    }

    #[test]
    fn test_iterator_stops_at_end() {
        let input = "................\nxx\n";
        let results = PuzzleSource::new(Cursor::new(input), Size::Four).collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
