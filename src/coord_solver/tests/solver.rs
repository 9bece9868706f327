use coord_solver::{
    cube::{Face, Move, random_scramble},
    goals::Goal,
    notation::{format_moves, parse_moves},
    solver::{SolverConfig, SolverError, SubgoalSolver},
};
use itertools::Itertools;
use log::info;

fn assert_canonical(solution: &[Move]) {
    for (a, b) in solution.iter().tuple_windows() {
        assert_ne!(a.face(), b.face(), "{}", format_moves(solution));
        assert!(
            !matches!(
                (a.face(), b.face()),
                (Face::B, Face::F) | (Face::L, Face::R) | (Face::D, Face::U)
            ),
            "{}",
            format_moves(solution)
        );
    }
}

/// Solve `scramble`, check that the solution reaches the goal, and check that
/// nothing shorter does.
fn solve_optimally(config: SolverConfig, scramble: &[Move]) -> Vec<Move> {
    let solver = SubgoalSolver::new(config.clone());
    let solution = solver.solve(scramble).unwrap();
    info!(
        "{} solves {}",
        format_moves(&solution),
        format_moves(scramble)
    );

    assert!(solver.is_solved_after(scramble, &solution).unwrap());
    assert!(usize::from(solver.lower_bound(scramble).unwrap()) <= solution.len());
    assert_canonical(&solution);

    if let Some(shorter) = solution.len().checked_sub(1) {
        let bounded = SubgoalSolver::new(config.with_max_solution_length(shorter));
        assert!(matches!(
            bounded.solve(scramble),
            Err(SolverError::MaxSolutionLengthExceeded { max_solution_length }) if max_solution_length == shorter
        ));
    }
    solution
}

#[test_log::test]
fn test_empty_scramble() {
    let solver = SubgoalSolver::new(Goal::Cross.config());
    assert_eq!(solver.solve(&[]).unwrap(), vec![]);
    assert_eq!(solver.solve_str("").unwrap(), "");
}

#[test_log::test]
fn test_single_move() {
    // R cycles edge slots 0, 11, 4 and 8
    let config = SolverConfig::new().with_edge_permutation(&[4, 8]).unwrap();
    let solver = SubgoalSolver::new(config);
    assert_eq!(solver.solve_str("R").unwrap(), "R'");
    assert_eq!(solver.solve_str("R2").unwrap(), "R2");
    assert_eq!(solver.solve_str("R'").unwrap(), "R");
}

#[test_log::test]
fn test_solution_undoes_four_moves() {
    let config = SolverConfig::new()
        .with_corner_permutation(&[0, 1, 2, 3, 4, 5, 6, 7])
        .unwrap()
        .with_corner_orientation(&[0, 1, 2, 3, 4, 5, 6, 7])
        .unwrap()
        .with_edge_orientation(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11])
        .unwrap();
    let scramble = parse_moves("R U F L").unwrap();
    let solution = solve_optimally(config, &scramble);
    assert_eq!(solution.len(), 4);
}

#[test_log::test]
fn test_presets_on_random_scrambles() {
    fastrand::seed(0x5eed);
    for goal in [Goal::EoLine, Goal::Cross] {
        for _ in 0..5 {
            let scramble = random_scramble(20);
            let solution = solve_optimally(goal.config(), &scramble);
            // Both are known to take at most 9 moves
            assert!(solution.len() <= 9, "{goal}: {}", format_moves(&solution));
        }
    }
}

#[test_log::test]
fn test_xcross_on_short_scrambles() {
    fastrand::seed(42);
    for goal in [Goal::XCross, Goal::EoXCross] {
        let scramble = random_scramble(5);
        let solution = solve_optimally(goal.config(), &scramble);
        assert!(solution.len() <= 5);
    }
}

#[test_log::test]
fn test_solver_is_reusable() {
    let solver = SubgoalSolver::new(Goal::EoLine.config());
    solver.initialize().unwrap();
    for scramble in ["F", "B' R2 D", "U F2 L' B R D2"] {
        let solution = solver.solve_str(scramble).unwrap();
        let scramble = parse_moves(scramble).unwrap();
        assert!(
            solver
                .is_solved_after(&scramble, &parse_moves(&solution).unwrap())
                .unwrap()
        );
    }
}

#[test_log::test]
fn test_max_solution_length() {
    let solver = SubgoalSolver::new(Goal::Cross.config().with_max_solution_length(0));
    assert!(matches!(
        solver.solve_str("F"),
        Err(SolverError::MaxSolutionLengthExceeded {
            max_solution_length: 0
        })
    ));
    assert_eq!(solver.solve_str("U").unwrap(), "");
}

#[test_log::test]
fn test_invalid_scramble() {
    let solver = SubgoalSolver::new(Goal::Cross.config());
    assert!(matches!(
        solver.solve_str("R U X"),
        Err(SolverError::Notation(_))
    ));
}
