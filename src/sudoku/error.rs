//! Error types for puzzle loading and solving

use crate::smt::SmtError;
use thiserror::Error;

/// Errors surfaced by the puzzle source and the solver driver
#[derive(Debug, Error)]
pub enum SudokuError {
    /// A puzzle line that cannot be encoded; `line` is 1-based
    #[error("malformed puzzle on line {line}: {reason}")]
    MalformedPuzzle { line: usize, reason: String },

    /// No more puzzles to read
    #[error("puzzle source exhausted")]
    ExhaustedSource,

    /// The engine returned neither sat nor unsat
    #[error("engine failure: {0}")]
    EngineFailure(String),

    /// `solve_once` or `enumerate_all` before any puzzle was loaded
    #[error("no puzzle loaded")]
    NoPuzzleLoaded,

    /// Block sizes outside 2..=5
    #[error("unsupported block size {0}, expected 2 to 5")]
    InvalidBlockSize(usize),

    /// Reading the puzzle source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SudokuError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPuzzle {
            line,
            reason: reason.into(),
        }
    }
}

impl From<SmtError> for SudokuError {
    fn from(e: SmtError) -> Self {
        Self::EngineFailure(e.to_string())
    }
}

pub type SudokuResult<T> = Result<T, SudokuError>;
