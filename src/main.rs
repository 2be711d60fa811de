//! # sudoku-smt
//!
//! Command-line front end for the `sudoku_smt` library. Puzzles are read one
//! per line from a file (or from every `.txt` file beneath a directory), each
//! one becomes a fresh constraint session over bounded integers, and the
//! search runs on the crate's CDCL engine.
//!
//! ## Subcommands
//!
//! 1.  **`basic`**: print one solution per puzzle.
//!     ```sh
//!     sudoku-smt basic --path puzzles.txt
//!     ```
//!
//! 2.  **`advanced`**: add the row parity rule, enumerate every solution and
//!     time each puzzle. The run stops with "We have a problem!" as soon as a
//!     puzzle has no solution or exceeds `--threshold-secs`.
//!     ```sh
//!     sudoku-smt advanced --path adv_puzzles.txt --count 25
//!     ```
//!
//! 3.  **`completions`**: print a shell completion script.
//!
//! ## Common Options
//!
//! -   `-d, --debug`: log at DEBUG instead of INFO.
//! -   `-b, --block-size <N>`: block side, 2 to 5 (default 3).
//! -   `-n, --count <N>`: stop after N puzzles.
//! -   `--on-malformed skip|abort`: policy for invalid puzzle lines (default `skip`).
//! -   `--conflict-limit <N>`: give up on a single engine call after N conflicts.
//! -   `--restart-strategy`, `--variable-selection`: search heuristics.
//! -   `--stats`, `--verify`, `--export-dimacs`.

use clap::{CommandFactory, Parser};
use command_line::cli::{Cli, Commands, run};
use std::time::Duration;
use sudoku_smt::sudoku::Variant;
use sudoku_smt::sudoku::timing::DEFAULT_THRESHOLD;
use tracing::{Level, error};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Basic { path, common } => {
            init_tracing(common.debug);
            run(&path, Variant::Basic, DEFAULT_THRESHOLD, &common)
        }
        Commands::Advanced {
            path,
            threshold_secs,
            common,
        } => {
            init_tracing(common.debug);
            run(
                &path,
                Variant::Advanced,
                Duration::from_secs(threshold_secs),
                &common,
            )
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
