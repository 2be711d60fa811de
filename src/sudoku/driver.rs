#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-puzzle solving sessions and the driver that feeds them from a source.
//!
//! Every puzzle gets a fresh [`Session`]: nothing posted for one puzzle,
//! exclusion clauses included, can reach the next. Within a session
//! constraints only accumulate, so once enumeration has run out of
//! solutions every further solve reports [`Outcome::Unsatisfiable`].

use crate::sat::literal::Literal;
use crate::sat::solver::SolutionStats;
use crate::smt::{CheckResult, EngineOptions, Session};
use crate::sudoku::constraints::{self, Variant};
use crate::sudoku::error::{SudokuError, SudokuResult};
use crate::sudoku::grid::Grid;
use crate::sudoku::puzzle::{Puzzle, Size};
use crate::sudoku::solution::Solution;
use crate::sudoku::source::PuzzleSource;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverOptions {
    pub size: Size,
    pub variant: Variant,
    pub engine: EngineOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// No (further) solution exists.
    Unsatisfiable,
}

/// The constraint session of one puzzle.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    puzzle: Puzzle,
    variant: Variant,
    session: Session,
    grid: Grid,
    found: usize,
}

impl PuzzleSession {
    /// Declares the grid and posts the rules of `variant` for `puzzle`.
    pub fn new(puzzle: Puzzle, variant: Variant, engine: EngineOptions) -> SudokuResult<Self> {
        let mut session = Session::new(engine);
        let grid = Grid::declare(&mut session, puzzle.size())?;
        constraints::apply(&mut session, &grid, &puzzle, variant)?;
        debug!(
            %variant,
            vars = session.num_sat_vars(),
            clauses = session.num_clauses(),
            "session ready"
        );
        Ok(Self {
            puzzle,
            variant,
            session,
            grid,
            found: 0,
        })
    }

    /// One solution under the constraints posted so far.
    ///
    /// # Errors
    ///
    /// `EngineFailure` when the engine gives up; that is never reported as
    /// unsatisfiable.
    pub fn solve_once(&mut self) -> SudokuResult<Outcome> {
        match self.session.check()? {
            CheckResult::Sat => {
                let solution = Solution::from_model(self.session.model()?, &self.grid)?;
                Ok(Outcome::Solved(solution))
            }
            CheckResult::Unsat => Ok(Outcome::Unsatisfiable),
            CheckResult::Unknown(reason) => Err(SudokuError::EngineFailure(reason)),
        }
    }

    /// Requires every later solution to differ from `solution` in at least
    /// one cell.
    pub fn exclude(&mut self, solution: &Solution) -> SudokuResult<()> {
        let lits = self
            .grid
            .cells()
            .iter()
            .zip(solution.values())
            .map(|(&cell, &v)| {
                self.session
                    .eq_lit(cell, i64::from(v))
                    .map(Literal::negated)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.session.add_clause(lits);
        Ok(())
    }

    /// Solves, records and excludes until no solution is left.
    pub fn enumerate_all(&mut self) -> SudokuResult<Vec<Solution>> {
        self.solutions().collect()
    }

    /// Lazy form of [`PuzzleSession::enumerate_all`].
    pub fn solutions(&mut self) -> SolutionIter<'_> {
        SolutionIter {
            session: self,
            done: false,
        }
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Solutions handed out by the iterator so far.
    #[must_use]
    pub const fn found(&self) -> usize {
        self.found
    }

    #[must_use]
    pub fn stats(&self) -> SolutionStats {
        self.session.stats()
    }

    #[must_use]
    pub fn num_sat_vars(&self) -> usize {
        self.session.num_sat_vars()
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.session.num_clauses()
    }

    #[must_use]
    pub fn to_dimacs(&self) -> String {
        self.session.to_dimacs()
    }
}

/// Yields solutions until the session is exhausted or an error occurs.
#[derive(Debug)]
pub struct SolutionIter<'a> {
    session: &'a mut PuzzleSession,
    done: bool,
}

impl Iterator for SolutionIter<'_> {
    type Item = SudokuResult<Solution>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = self.session.solve_once().and_then(|outcome| match outcome {
            Outcome::Solved(solution) => {
                self.session.exclude(&solution)?;
                Ok(Some(solution))
            }
            Outcome::Unsatisfiable => Ok(None),
        });
        match step {
            Ok(Some(solution)) => {
                self.session.found += 1;
                debug!(round = self.session.found, "solution found");
                Some(Ok(solution))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Pulls puzzles from a source and owns the session of the current one.
#[derive(Debug)]
pub struct SolverDriver<R: BufRead> {
    source: PuzzleSource<R>,
    options: DriverOptions,
    current: Option<PuzzleSession>,
}

impl<R: BufRead> SolverDriver<R> {
    pub const fn new(reader: R, options: DriverOptions) -> Self {
        Self {
            source: PuzzleSource::new(reader, options.size),
            options,
            current: None,
        }
    }

    /// Reads the next puzzle and builds a fresh session for it.
    ///
    /// The previous session is dropped first, also when reading fails.
    ///
    /// # Errors
    ///
    /// `ExhaustedSource`, `MalformedPuzzle` or `Io` from the source.
    pub fn load_next_puzzle(&mut self) -> SudokuResult<&Puzzle> {
        self.current = None;
        let puzzle = self.source.next_puzzle()?;
        debug!(line = self.source.line(), "puzzle loaded");
        let session = PuzzleSession::new(puzzle, self.options.variant, self.options.engine)?;
        Ok(self.current.insert(session).puzzle())
    }

    fn current_mut(&mut self) -> SudokuResult<&mut PuzzleSession> {
        self.current.as_mut().ok_or(SudokuError::NoPuzzleLoaded)
    }

    pub fn solve_once(&mut self) -> SudokuResult<Outcome> {
        self.current_mut()?.solve_once()
    }

    pub fn enumerate_all(&mut self) -> SudokuResult<Vec<Solution>> {
        self.current_mut()?.enumerate_all()
    }

    /// The session of the loaded puzzle, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&PuzzleSession> {
        self.current.as_ref()
    }

    pub fn current_session(&mut self) -> Option<&mut PuzzleSession> {
        self.current.as_mut()
    }

    #[must_use]
    pub const fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Line number of the most recently read puzzle.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.source.line()
    }
}

impl SolverDriver<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>, options: DriverOptions) -> SudokuResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options(size: Size, variant: Variant) -> DriverOptions {
        DriverOptions {
            size,
            variant,
            ..DriverOptions::default()
        }
    }

    #[test]
    fn test_solve_before_load() {
        let mut driver = SolverDriver::new(Cursor::new(""), DriverOptions::default());
        assert!(matches!(
            driver.solve_once(),
            Err(SudokuError::NoPuzzleLoaded)
        ));
        assert!(matches!(
            driver.load_next_puzzle(),
            Err(SudokuError::ExhaustedSource)
        ));
    }

    #[test]
    fn test_small_enumeration_counts() {
        let input = "12..34..........\n1...............\n";
        let mut driver = SolverDriver::new(Cursor::new(input), options(Size::Four, Variant::Basic));

        driver.load_next_puzzle().unwrap();
        assert_eq!(driver.enumerate_all().unwrap().len(), 12);
        assert_eq!(driver.solve_once().unwrap(), Outcome::Unsatisfiable);

        driver.load_next_puzzle().unwrap();
        assert_eq!(driver.enumerate_all().unwrap().len(), 72);
    }

    #[test]
    fn test_advanced_small_grid() {
        let input = "................\n12..34..........\n";
        let mut driver =
            SolverDriver::new(Cursor::new(input), options(Size::Four, Variant::Advanced));

        let puzzle = driver.load_next_puzzle().unwrap().clone();
        let solutions = driver.enumerate_all().unwrap();
        assert_eq!(solutions.len(), 16);
        for s in &solutions {
            assert!(s.verify(&puzzle, Variant::Advanced).is_empty());
        }

        driver.load_next_puzzle().unwrap();
        assert!(driver.enumerate_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_drops_previous_session() {
        let input = "................\nbad\n";
        let mut driver = SolverDriver::new(Cursor::new(input), options(Size::Four, Variant::Basic));
        driver.load_next_puzzle().unwrap();
        assert!(driver.current().is_some());
        assert!(matches!(
            driver.load_next_puzzle(),
            Err(SudokuError::MalformedPuzzle { line: 2, .. })
        ));
        assert!(driver.current().is_none());
    }
}
