use std::io::Cursor;
use sudoku_smt::sudoku::{
    DriverOptions, Outcome, Puzzle, Size, SolverDriver, SudokuError, Variant, render_grid,
};

const CLASSIC: &str =
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
const CLASSIC_SOLVED: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

fn driver(input: &str) -> SolverDriver<Cursor<String>> {
    SolverDriver::new(Cursor::new(input.to_string()), DriverOptions::default())
}

#[test]
fn test_classic_puzzle() {
    let mut driver = driver(CLASSIC);
    let puzzle = driver.load_next_puzzle().unwrap().clone();

    let Outcome::Solved(solution) = driver.solve_once().unwrap() else {
        panic!("classic puzzle is satisfiable");
    };
    assert_eq!(solution.to_string(), CLASSIC_SOLVED);
    assert!(solution.verify(&puzzle, Variant::Basic).is_empty());
}

#[test]
fn test_classic_puzzle_is_unique() {
    let mut driver = driver(CLASSIC);
    driver.load_next_puzzle().unwrap();
    let solutions = driver.enumerate_all().unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(driver.solve_once().unwrap(), Outcome::Unsatisfiable);
    assert_eq!(driver.solve_once().unwrap(), Outcome::Unsatisfiable);
}

#[test]
fn test_full_grid_round_trips() {
    let mut driver = driver(CLASSIC_SOLVED);
    let puzzle = driver.load_next_puzzle().unwrap().clone();
    assert!(puzzle.is_complete());

    let Outcome::Solved(solution) = driver.solve_once().unwrap() else {
        panic!("a valid full grid is its own solution");
    };
    assert_eq!(solution.to_puzzle(), puzzle);
    assert_eq!(solution.to_string(), CLASSIC_SOLVED);
}

#[test]
fn test_contradicting_givens() {
    // two 5s in the first row
    let broken = format!("55{}", &CLASSIC[2..]);
    let mut driver = driver(&broken);
    driver.load_next_puzzle().unwrap();
    assert_eq!(driver.solve_once().unwrap(), Outcome::Unsatisfiable);
}

#[test]
fn test_sessions_do_not_leak() {
    // exhaust the first puzzle, then solve the same puzzle again
    let input = format!("{CLASSIC}\n{CLASSIC}\n");
    let mut driver = driver(&input);

    driver.load_next_puzzle().unwrap();
    assert_eq!(driver.enumerate_all().unwrap().len(), 1);
    assert_eq!(driver.solve_once().unwrap(), Outcome::Unsatisfiable);

    driver.load_next_puzzle().unwrap();
    assert!(matches!(driver.solve_once().unwrap(), Outcome::Solved(_)));
}

#[test]
fn test_malformed_lines_are_skippable() {
    let input = format!("{}\n\n{CLASSIC}x\n{CLASSIC}\n", &CLASSIC[..80]);
    let mut driver = driver(&input);

    let mut lines = Vec::new();
    let mut solved = 0;
    loop {
        match driver.load_next_puzzle() {
            Ok(_) => {
                if let Outcome::Solved(_) = driver.solve_once().unwrap() {
                    solved += 1;
                }
            }
            Err(SudokuError::MalformedPuzzle { line, .. }) => lines.push(line),
            Err(SudokuError::ExhaustedSource) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(solved, 1);
}

#[test]
fn test_sixteen_by_sixteen_empty_grid() {
    let options = DriverOptions {
        size: Size::Sixteen,
        ..DriverOptions::default()
    };
    let mut driver = SolverDriver::new(Cursor::new(".".repeat(256)), options);
    let puzzle = driver.load_next_puzzle().unwrap().clone();
    let Outcome::Solved(solution) = driver.solve_once().unwrap() else {
        panic!("the empty grid is satisfiable");
    };
    assert!(solution.verify(&puzzle, Variant::Basic).is_empty());
}

#[test]
fn test_render_classic() {
    let puzzle = Puzzle::parse(CLASSIC, Size::Nine, 1).unwrap();
    let rendered = render_grid(&puzzle.to_string(), 3).unwrap();
    let rows = rendered.lines().collect::<Vec<_>>();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0], "5 3 - - 7 - - - -");
    assert_eq!(rows[8], "- - - - 8 - - 7 9");
}
