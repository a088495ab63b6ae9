//! CSP lock tests.
//!
//! - SEND + MORE = MONEY solves to its unique answer.
//! - 1-consistency is idempotent.
//! - The solver finds a solution exactly when exhaustive enumeration does,
//!   and every solution it returns satisfies all constraints.

use athena_csp::cryptarithmetic::CryptarithmeticPuzzle;
use athena_csp::problem::{Assignment, Constraint, CspProblem};
use athena_csp::solver::{one_consistency, solve, solve_with_report};
use lock_tests::SEND_MORE_MONEY;
use proptest::prelude::*;

#[test]
fn send_more_money() {
    let puzzle: CryptarithmeticPuzzle = SEND_MORE_MONEY.parse().unwrap();
    let mut problem = puzzle.to_problem();
    let outcome = solve_with_report(&mut problem);
    let solution = outcome.solution.unwrap();

    assert_eq!(puzzle.format_assignment(&solution), "9567 + 1085 = 10652");
    assert!(puzzle.is_solved_by(&puzzle.letter_digits(&solution)));
    assert!(problem.is_solution(&solution));
    assert!(!outcome.report.one_consistency_failed);
    assert!(outcome.report.completeness_checks > 0);
}

#[test]
fn solve_report_is_deterministic() {
    let puzzle: CryptarithmeticPuzzle = "TWO + TWO = FOUR".parse().unwrap();
    let first = solve_with_report(&mut puzzle.to_problem());
    for _ in 0..3 {
        let again = solve_with_report(&mut puzzle.to_problem());
        assert_eq!(again.solution, first.solution);
        assert_eq!(again.report.digest().unwrap(), first.report.digest().unwrap());
    }
}

// --- Random binary CSPs ---

const VARIABLES: [&str; 4] = ["w", "x", "y", "z"];

/// `(first, second, relation)`: 0 is `!=`, 1 is `<`, 2 is `==`.
type ConstraintSpec = (usize, usize, u8);

fn build(domains: &[Vec<u8>], unary_mod: &[(usize, u8)], binaries: &[ConstraintSpec]) -> CspProblem<u8> {
    let mut problem = CspProblem::default();
    for (name, domain) in VARIABLES.iter().zip(domains) {
        problem.add_variable(*name, domain.iter().copied());
    }
    for &(variable, modulus) in unary_mod {
        problem.add_constraint(Constraint::unary(VARIABLES[variable], move |v: &u8| {
            v % modulus != 0
        }));
    }
    for &(a, b, relation) in binaries {
        if a == b {
            continue;
        }
        let condition: fn(&u8, &u8) -> bool = match relation {
            0 => |x, y| x != y,
            1 => |x, y| x < y,
            _ => |x, y| x == y,
        };
        problem.add_constraint(Constraint::binary(VARIABLES[a], VARIABLES[b], condition));
    }
    problem
}

fn brute_force_has_solution(problem: &CspProblem<u8>) -> bool {
    fn extend(problem: &CspProblem<u8>, index: usize, assignment: &mut Assignment<u8>) -> bool {
        let Some(variable) = problem.variables.get(index) else {
            return problem.is_solution(assignment);
        };
        for value in &problem.domains[variable] {
            assignment.insert(variable.clone(), *value);
            if extend(problem, index + 1, assignment) {
                return true;
            }
        }
        assignment.remove(variable);
        false
    }
    extend(problem, 0, &mut Assignment::new())
}

fn csp_strategy() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<(usize, u8)>, Vec<ConstraintSpec>)> {
    (
        prop::collection::vec(prop::collection::vec(0u8..5, 0..5), 4),
        prop::collection::vec((0usize..4, 2u8..4), 0..3),
        prop::collection::vec((0usize..4, 0usize..4, 0u8..3), 0..7),
    )
}

proptest! {
    #[test]
    fn one_consistency_is_idempotent((domains, unary, binaries) in csp_strategy()) {
        let mut problem = build(&domains, &unary, &binaries);
        let first = one_consistency(&mut problem);
        let domains_after_first = problem.domains.clone();
        let constraints_after_first = problem.constraints.len();

        let second = one_consistency(&mut problem);
        prop_assert_eq!(first, second);
        prop_assert_eq!(&problem.domains, &domains_after_first);
        prop_assert_eq!(problem.constraints.len(), constraints_after_first);
        prop_assert!(problem.constraints.iter().all(|c| !c.is_unary()));
    }

    #[test]
    fn solver_agrees_with_enumeration((domains, unary, binaries) in csp_strategy()) {
        let reference = build(&domains, &unary, &binaries);
        let expected = brute_force_has_solution(&reference);

        let mut problem = build(&domains, &unary, &binaries);
        let solution = solve(&mut problem);
        prop_assert_eq!(solution.is_some(), expected);
        if let Some(assignment) = solution {
            prop_assert!(reference.is_solution(&assignment));
        }
    }
}
