#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_smt::sat::restarter::RestarterType;
use sudoku_smt::sat::variable_selection::VariableSelectionType;
use sudoku_smt::smt::EngineOptions;
use sudoku_smt::sudoku::{
    DriverOptions, Outcome, Puzzle, PuzzleSession, Size, Solution, SolverDriver, SudokuError,
    SudokuResult, Timings, Variant, Verdict, render_grid,
};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{debug, info, warn};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-smt",
    version,
    about = "Sudoku and parity-sum Sudoku on a CDCL engine"
)]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (`basic`, `advanced` or `completions`).
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Find one solution for every puzzle.
    Basic {
        /// A puzzle file, one puzzle per line, or a directory of `.txt` puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Enumerate every solution under the row parity rule and time each puzzle.
    Advanced {
        /// A puzzle file, one puzzle per line, or a directory of `.txt` puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// A puzzle taking longer than this many seconds stops the run.
        #[arg(long, default_value_t = 60)]
        threshold_secs: u64,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// What to do with a line that is not a valid puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum MalformedPolicy {
    /// Log it and continue with the next line.
    #[default]
    Skip,
    /// Stop the run with an error.
    Abort,
}

/// Defines common command-line options shared across the solving subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Side length of one block; puzzles have (block size)^4 cells.
    #[arg(short, long, default_value_t = 3)]
    pub(crate) block_size: usize,

    /// Stop after this many puzzles.
    #[arg(short = 'n', long)]
    pub(crate) count: Option<usize>,

    #[arg(long, value_enum, default_value_t = MalformedPolicy::Skip)]
    pub(crate) on_malformed: MalformedPolicy,

    /// Give up on a single engine call after this many conflicts.
    #[arg(long)]
    pub(crate) conflict_limit: Option<usize>,

    #[arg(long, default_value_t = RestarterType::Luby)]
    pub(crate) restart_strategy: RestarterType,

    #[arg(long, default_value_t = VariableSelectionType::Vsids)]
    pub(crate) variable_selection: VariableSelectionType,

    /// Enable printing of problem and search statistics after every puzzle.
    #[arg(long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Check every solution against the rules without the engine.
    #[arg(long, default_value_t = false)]
    pub(crate) verify: bool,

    /// Write the clauses of every puzzle to `<file>.<n>.cnf`.
    #[arg(long, default_value_t = false)]
    pub(crate) export_dimacs: bool,
}

impl CommonOptions {
    pub(crate) fn driver_options(&self, variant: Variant) -> SudokuResult<DriverOptions> {
        Ok(DriverOptions {
            size: Size::from_block_size(self.block_size)?,
            variant,
            engine: EngineOptions {
                restart: self.restart_strategy,
                selection: self.variable_selection,
                conflict_limit: self.conflict_limit,
            },
        })
    }
}

/// The puzzle files under `path`: the file itself, or every `.txt` file
/// beneath a directory in name order.
pub(crate) fn collect_inputs(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect()
}

/// Solves every puzzle under `path` in `variant` mode.
///
/// In advanced mode the run stops early, printing the timings so far, as soon
/// as a puzzle has no solution or takes longer than `threshold`.
///
/// # Errors
///
/// Unreadable files, an invalid block size, a malformed puzzle under
/// [`MalformedPolicy::Abort`], or a solution that fails `--verify`.
pub(crate) fn run(
    path: &Path,
    variant: Variant,
    threshold: Duration,
    common: &CommonOptions,
) -> SudokuResult<()> {
    let options = common.driver_options(variant)?;
    let mut timings = Timings::new(threshold);
    let mut seen = 0;

    for file in collect_inputs(path) {
        info!(path = %file.display(), %variant, "reading puzzles");
        let mut driver = SolverDriver::from_path(&file, options)?;

        while common.count.is_none_or(|n| seen < n) {
            match driver.load_next_puzzle() {
                Ok(_) => {}
                Err(SudokuError::ExhaustedSource) => break,
                Err(e @ SudokuError::MalformedPuzzle { .. })
                    if common.on_malformed == MalformedPolicy::Skip =>
                {
                    warn!(path = %file.display(), error = %e, "skipping puzzle");
                    continue;
                }
                Err(e) => return Err(e),
            }
            seen += 1;

            let session = driver
                .current_session()
                .ok_or(SudokuError::NoPuzzleLoaded)?;
            if common.export_dimacs {
                export_dimacs(&file, seen, session)?;
            }

            match variant {
                Variant::Basic => solve_basic(session, common)?,
                Variant::Advanced => {
                    if solve_advanced(session, common, &mut timings)? == Verdict::Problem {
                        println!("We have a problem!");
                        println!("{timings}");
                        return Ok(());
                    }
                }
            }
        }
    }

    if variant == Variant::Advanced {
        println!("time elapsed for solving each puzzle:");
        println!("{timings}");
    }
    Ok(())
}

fn print_puzzle(puzzle: &Puzzle) -> SudokuResult<()> {
    println!("problem:");
    println!(
        "{}",
        render_grid(&puzzle.to_string(), puzzle.size().block_size())?
    );
    Ok(())
}

fn print_solution(solution: &Solution) -> SudokuResult<()> {
    println!(
        "{}",
        render_grid(&solution.to_string(), solution.size().block_size())?
    );
    Ok(())
}

/// Solves the loaded puzzle once and prints the outcome.
pub(crate) fn solve_basic(session: &mut PuzzleSession, common: &CommonOptions) -> SudokuResult<()> {
    let puzzle = session.puzzle().clone();
    print_puzzle(&puzzle)?;
    println!("solving...");

    let start = Instant::now();
    let outcome = session.solve_once();
    let elapsed = start.elapsed();

    let solutions = match outcome {
        Ok(Outcome::Solved(solution)) => {
            println!("\nsolution found!");
            print_solution(&solution)?;
            if common.verify {
                verify_solution(&solution, &puzzle, Variant::Basic)?;
            }
            1
        }
        Ok(Outcome::Unsatisfiable) => {
            println!("\ncould not find solution");
            0
        }
        Err(SudokuError::EngineFailure(reason)) => {
            warn!(%reason, "engine gave up");
            println!("\nengine gave up: {reason}");
            0
        }
        Err(e) => return Err(e),
    };
    info!(elapsed_ms = elapsed.as_millis(), solutions, "puzzle done");

    if common.stats {
        print_stats(session, elapsed, solutions);
    }
    println!("\n=========\n");
    Ok(())
}

/// Enumerates every solution of the loaded puzzle and records its time.
pub(crate) fn solve_advanced(
    session: &mut PuzzleSession,
    common: &CommonOptions,
    timings: &mut Timings,
) -> SudokuResult<Verdict> {
    let puzzle = session.puzzle().clone();
    print_puzzle(&puzzle)?;
    println!("solving...");

    let start = Instant::now();
    let mut found = 0;
    let mut gave_up = false;
    for result in session.solutions() {
        match result {
            Ok(solution) => {
                found += 1;
                println!("\nsolution {found} found!");
                print_solution(&solution)?;
                if common.verify {
                    verify_solution(&solution, &puzzle, Variant::Advanced)?;
                }
            }
            Err(SudokuError::EngineFailure(reason)) => {
                warn!(%reason, found, "engine gave up");
                println!("\nengine gave up: {reason}");
                gave_up = true;
            }
            Err(e) => return Err(e),
        }
    }
    let elapsed = start.elapsed();

    println!("answer:\t{found} solutions");
    info!(elapsed_ms = elapsed.as_millis(), solutions = found, "puzzle done");
    if common.stats {
        print_stats(session, elapsed, found);
    }

    let counted = if gave_up { 0 } else { found };
    Ok(timings.record(elapsed, counted))
}

/// Checks `solution` without the engine and fails on the first broken rule.
pub(crate) fn verify_solution(
    solution: &Solution,
    puzzle: &Puzzle,
    variant: Variant,
) -> SudokuResult<()> {
    let violations = solution.verify(puzzle, variant);
    println!("Verified: {}", violations.is_empty());
    match violations.first() {
        None => Ok(()),
        Some(violation) => Err(SudokuError::EngineFailure(format!(
            "solution failed verification: {violation}"
        ))),
    }
}

fn export_dimacs(file: &Path, index: usize, session: &PuzzleSession) -> SudokuResult<()> {
    let dimacs_path = format!("{}.{index}.cnf", file.display());
    std::fs::write(&dimacs_path, session.to_dimacs())?;
    debug!(clauses = session.num_clauses(), "dimacs exported");
    println!("DIMACS written to: {dimacs_path}");
    Ok(())
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
pub(crate) fn memory_mib() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics for one puzzle.
pub(crate) fn print_stats(session: &PuzzleSession, elapsed: Duration, solutions: usize) {
    let s = session.stats();
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Variant", session.variant());
    stat_line("Givens", session.puzzle().givens().count());
    stat_line("Variables", session.num_sat_vars());
    stat_line("Clauses (incl. learnt)", session.num_clauses());

    println!("========================[ Search Statistics ]========================");
    stat_line("Solutions", solutions);
    stat_line("Learnt clauses", s.learnt_clauses);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Restarts", s.restarts, elapsed_secs);
    if let Some((allocated, resident)) = memory_mib() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_advanced_defaults() {
        let cli = Cli::try_parse_from(["sudoku-smt", "advanced", "--path", "puzzles.txt"]).unwrap();
        let Commands::Advanced {
            path,
            threshold_secs,
            common,
        } = cli.command
        else {
            panic!("expected the advanced subcommand");
        };
        assert_eq!(path, PathBuf::from("puzzles.txt"));
        assert_eq!(threshold_secs, 60);
        assert_eq!(common.block_size, 3);
        assert_eq!(common.on_malformed, MalformedPolicy::Skip);
        assert!(!common.verify);
        assert_eq!(common.count, None);
    }

    #[test]
    fn test_parse_engine_options() {
        let cli = Cli::try_parse_from([
            "sudoku-smt",
            "basic",
            "--path",
            "p.txt",
            "--block-size",
            "2",
            "--conflict-limit",
            "500",
            "--restart-strategy",
            "never",
            "--variable-selection",
            "fixed",
            "--on-malformed",
            "abort",
        ])
        .unwrap();
        let Commands::Basic { common, .. } = cli.command else {
            panic!("expected the basic subcommand");
        };
        let options = common.driver_options(Variant::Basic).unwrap();
        assert_eq!(options.size, Size::Four);
        assert_eq!(options.engine.conflict_limit, Some(500));
        assert_eq!(options.engine.restart, RestarterType::Never);
        assert_eq!(options.engine.selection, VariableSelectionType::Fixed);
        assert_eq!(common.on_malformed, MalformedPolicy::Abort);
    }

    #[test]
    fn test_invalid_block_size() {
        let cli =
            Cli::try_parse_from(["sudoku-smt", "basic", "--path", "p.txt", "-b", "7"]).unwrap();
        let Commands::Basic { common, .. } = cli.command else {
            panic!("expected the basic subcommand");
        };
        assert!(matches!(
            common.driver_options(Variant::Basic),
            Err(SudokuError::InvalidBlockSize(7))
        ));
    }

    #[test]
    fn test_single_file_input() {
        let path = Path::new("does/not/exist.txt");
        assert_eq!(collect_inputs(path), vec![path.to_path_buf()]);
    }
}
