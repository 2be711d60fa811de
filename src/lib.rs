#![warn(missing_docs)]
//! Sudoku and parity-sum Sudoku as bounded-integer constraint problems, solved and enumerated
//! on a CDCL SAT solver.

/// The `sat` module implements the CDCL SAT solver, which determines the satisfiability of
/// Boolean formulas and accepts clauses between calls.
pub mod sat;

/// The `smt` module encodes bounded integer variables, all-distinct and linear constraints
/// into clauses for the `sat` solver.
pub mod smt;

/// The `sudoku` module reads puzzles, posts the Sudoku rules and drives solving and
/// enumeration.
pub mod sudoku;
