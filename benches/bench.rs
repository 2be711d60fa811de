use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Debug;
use std::hint::black_box;
use std::marker::PhantomData;
use std::time::Duration;
use sudoku_smt::sat::cdcl::Cdcl;
use sudoku_smt::sat::cnf::Cnf;
use sudoku_smt::sat::literal::{DoubleLiteral, Literal, PackedLiteral};
use sudoku_smt::sat::phase_saving::{PhaseSelector, RandomPhases, SavedPhases};
use sudoku_smt::sat::restarter::{Geometric, Luby, Never, Restarter, RestarterType};
use sudoku_smt::sat::solver::{Solver, SolverConfig};
use sudoku_smt::sat::variable_selection::{VariableSelectionType, Vsids};
use sudoku_smt::smt::EngineOptions;
use sudoku_smt::sudoku::{Puzzle, PuzzleSession, Size, Variant};

const CLASSIC: &str =
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
const ADVANCED: &str =
    "2...54....589.....6....24...4....6....51.8.....2..5..3...72184...7.....2.2.596.17";

#[derive(Debug, Clone)]
struct RestarterConfig<R: Restarter>(PhantomData<R>);

impl<R: Restarter + Debug> SolverConfig for RestarterConfig<R> {
    type Literal = DoubleLiteral;
    type VariableSelector = Vsids;
    type Restarter = R;
    type PhaseSelector = SavedPhases;
}

#[derive(Debug, Clone)]
struct LiteralConfig<L: Literal>(PhantomData<L>);

impl<L: Literal + Debug> SolverConfig for LiteralConfig<L> {
    type Literal = L;
    type VariableSelector = Vsids;
    type Restarter = Luby<100>;
    type PhaseSelector = SavedPhases;
}

#[derive(Debug, Clone)]
struct PhaseSelectorConfig<P: PhaseSelector>(PhantomData<P>);

impl<P: PhaseSelector + Debug> SolverConfig for PhaseSelectorConfig<P> {
    type Literal = DoubleLiteral;
    type VariableSelector = Vsids;
    type Restarter = Luby<100>;
    type PhaseSelector = P;
}

/// `pigeons` pigeons in `pigeons - 1` holes.
fn pigeonhole(pigeons: i32) -> Vec<Vec<i32>> {
    let holes = pigeons - 1;
    let var = |p: i32, h: i32| p * holes + h + 1;
    let mut clauses = (0..pigeons)
        .map(|p| (0..holes).map(|h| var(p, h)).collect())
        .collect::<Vec<Vec<i32>>>();
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    clauses
}

fn solve_pigeonhole<C: SolverConfig>(clauses: &[Vec<i32>]) {
    let mut state: Cdcl<C> = Solver::new(Cnf::new(clauses.to_vec()));
    black_box(state.solve());
}

fn bench_pigeonhole(c: &mut Criterion) {
    let clauses = pigeonhole(7);

    let mut group = c.benchmark_group("pigeonhole - restarter");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(20));
    group.bench_function("Luby", |b| {
        b.iter(|| solve_pigeonhole::<RestarterConfig<Luby<100>>>(&clauses));
    });
    group.bench_function("Geometric", |b| {
        b.iter(|| solve_pigeonhole::<RestarterConfig<Geometric<2>>>(&clauses));
    });
    group.bench_function("Never", |b| {
        b.iter(|| solve_pigeonhole::<RestarterConfig<Never>>(&clauses));
    });
    group.finish();

    let mut group = c.benchmark_group("pigeonhole - literal layout");
    group.sample_size(20);
    group.bench_function("Double", |b| {
        b.iter(|| solve_pigeonhole::<LiteralConfig<DoubleLiteral>>(&clauses));
    });
    group.bench_function("Packed", |b| {
        b.iter(|| solve_pigeonhole::<LiteralConfig<PackedLiteral>>(&clauses));
    });
    group.finish();

    let mut group = c.benchmark_group("pigeonhole - phase selector");
    group.sample_size(20);
    group.bench_function("Saved", |b| {
        b.iter(|| solve_pigeonhole::<PhaseSelectorConfig<SavedPhases>>(&clauses));
    });
    group.bench_function("Random", |b| {
        b.iter(|| solve_pigeonhole::<PhaseSelectorConfig<RandomPhases>>(&clauses));
    });
    group.finish();
}

fn bench_sudoku(c: &mut Criterion) {
    let classic = Puzzle::parse(CLASSIC, Size::Nine, 1).unwrap();
    let advanced = Puzzle::parse(ADVANCED, Size::Nine, 1).unwrap();

    let mut group = c.benchmark_group("sudoku - restarter");
    group.sample_size(20);
    for restart in [RestarterType::Luby, RestarterType::Geometric, RestarterType::Never] {
        let engine = EngineOptions {
            restart,
            ..EngineOptions::default()
        };
        group.bench_function(format!("basic {restart}"), |b| {
            b.iter(|| {
                let mut session = PuzzleSession::new(classic.clone(), Variant::Basic, engine).unwrap();
                black_box(session.solve_once().unwrap());
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("sudoku - enumeration");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));
    for selection in [VariableSelectionType::Vsids, VariableSelectionType::Fixed] {
        let engine = EngineOptions {
            selection,
            ..EngineOptions::default()
        };
        group.bench_function(format!("advanced {selection}"), |b| {
            b.iter(|| {
                let mut session =
                    PuzzleSession::new(advanced.clone(), Variant::Advanced, engine).unwrap();
                black_box(session.enumerate_all().unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pigeonhole, bench_sudoku);
criterion_main!(benches);
