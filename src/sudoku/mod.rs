#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku and parity-sum Sudoku over the integer layer in [`crate::smt`].
//!
//! A [`SolverDriver`] reads puzzles from a [`PuzzleSource`], builds a fresh
//! [`PuzzleSession`] for each one and either asks for a single solution or
//! enumerates all of them by excluding every solution it has seen.

pub mod constraints;
pub mod driver;
pub mod error;
pub mod grid;
pub mod puzzle;
pub mod render;
pub mod solution;
pub mod source;
pub mod timing;

pub use constraints::Variant;
pub use driver::{DriverOptions, Outcome, PuzzleSession, SolverDriver};
pub use error::{SudokuError, SudokuResult};
pub use puzzle::{Puzzle, Size};
pub use render::render_grid;
pub use solution::{Solution, Violation};
pub use source::PuzzleSource;
pub use timing::{Timings, Verdict};
