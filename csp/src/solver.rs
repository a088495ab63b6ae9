//! Backtracking search with 1-consistency, forward checking, MRV and
//! least-constraining-value ordering.
//!
//! `problem.domains` is narrowed once by [`one_consistency`]. From then on
//! the solver only reads it: each recursion level receives its own copy of
//! the live domains (unassigned variables only), so sibling branches never
//! observe each other's pruning.

use std::collections::BTreeMap;

use crate::problem::{Assignment, Constraint, CspProblem, Domains};
use crate::report::SolveReport;

/// Answer and counters of one `solve` call.
#[derive(Debug, Clone)]
pub struct SolveOutcome<V> {
    /// The first complete assignment found, or `None` if none exists.
    pub solution: Option<Assignment<V>>,
    pub report: SolveReport,
}

/// Filter every domain through its unary constraints, then drop the unary
/// constraints from the problem.
///
/// Returns `false` if any declared variable is left with an empty domain.
/// A second call changes nothing.
pub fn one_consistency<V: Ord + Clone>(problem: &mut CspProblem<V>) -> bool {
    let constraints = std::mem::take(&mut problem.constraints);
    let mut remaining = Vec::with_capacity(constraints.len());
    for constraint in constraints {
        match constraint {
            Constraint::Unary {
                variable,
                condition,
            } => {
                if let Some(domain) = problem.domains.get_mut(&variable) {
                    domain.retain(|value| condition(value));
                }
            }
            binary @ Constraint::Binary { .. } => remaining.push(binary),
        }
    }
    problem.constraints = remaining;

    problem
        .variables
        .iter()
        .all(|v| problem.domains.get(v).is_some_and(|d| !d.is_empty()))
}

/// The unassigned variable with the fewest remaining values. Ties go to the
/// variable declared first.
///
/// `domains` holds the live domains of unassigned variables only. Returns
/// `None` when every variable is assigned.
pub fn minimum_remaining_values<'p, V>(
    problem: &'p CspProblem<V>,
    domains: &Domains<V>,
) -> Option<&'p str> {
    problem
        .variables
        .iter()
        .filter_map(|variable| domains.get(variable).map(|d| (d.len(), variable.as_str())))
        .min_by_key(|(size, _)| *size)
        .map(|(_, variable)| variable)
}

/// Prune the live domain of every unassigned variable linked to
/// `assigned_variable` by a binary constraint.
///
/// Returns `false` as soon as a domain becomes empty. Variables absent from
/// `domains` (already assigned) are skipped.
pub fn forward_checking<V: Ord + Clone>(
    problem: &CspProblem<V>,
    assigned_variable: &str,
    assigned_value: &V,
    domains: &mut Domains<V>,
) -> bool {
    for constraint in &problem.constraints {
        let Some(other) = constraint.other(assigned_variable) else {
            continue;
        };
        if other == assigned_variable {
            continue;
        }
        let Some(domain) = domains.get_mut(other) else {
            continue;
        };
        domain.retain(|candidate| constraint.allows(assigned_variable, assigned_value, candidate));
        if domain.is_empty() {
            return false;
        }
    }
    true
}

/// Order the values of `variable_to_assign` so the value leaving the most
/// total room in the other live domains comes first. Ties go to the smaller
/// value. `domains` is not modified.
pub fn least_restraining_values<V: Ord + Clone>(
    problem: &CspProblem<V>,
    variable_to_assign: &str,
    domains: &Domains<V>,
) -> Vec<V> {
    let Some(candidates) = domains.get(variable_to_assign) else {
        return Vec::new();
    };
    let mut ranked: Vec<(usize, &V)> = candidates
        .iter()
        .map(|value| {
            (
                remaining_room(problem, variable_to_assign, value, domains),
                value,
            )
        })
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    ranked.into_iter().map(|(_, value)| value.clone()).collect()
}

/// Total size of every other live domain after forward checking
/// `variable = value`, computed without touching `domains`.
fn remaining_room<V: Ord>(
    problem: &CspProblem<V>,
    variable: &str,
    value: &V,
    domains: &Domains<V>,
) -> usize {
    let mut pruned: BTreeMap<&str, Vec<&V>> = BTreeMap::new();
    for constraint in &problem.constraints {
        let Some(other) = constraint.other(variable) else {
            continue;
        };
        if other == variable {
            continue;
        }
        let Some(domain) = domains.get(other) else {
            continue;
        };
        pruned
            .entry(other)
            .or_insert_with(|| domain.iter().collect())
            .retain(|candidate| constraint.allows(variable, value, candidate));
    }
    domains
        .iter()
        .filter(|(name, _)| name.as_str() != variable)
        .map(|(name, domain)| pruned.get(name.as_str()).map_or(domain.len(), Vec::len))
        .sum()
}

/// Solve `problem`, returning the first complete assignment found.
///
/// Applies [`one_consistency`] to `problem` first, which narrows its
/// domains and drops its unary constraints.
pub fn solve<V: Ord + Clone>(problem: &mut CspProblem<V>) -> Option<Assignment<V>> {
    solve_with_report(problem).solution
}

/// [`solve`], plus the search counters.
pub fn solve_with_report<V: Ord + Clone>(problem: &mut CspProblem<V>) -> SolveOutcome<V> {
    let mut report = SolveReport::default();
    if !one_consistency(problem) {
        report.one_consistency_failed = true;
        return SolveOutcome {
            solution: None,
            report,
        };
    }
    let live = problem.domains.clone();
    let solution = backtrack(problem, Assignment::new(), live, &mut report);
    SolveOutcome { solution, report }
}

fn backtrack<V: Ord + Clone>(
    problem: &CspProblem<V>,
    assignment: Assignment<V>,
    domains: Domains<V>,
    report: &mut SolveReport,
) -> Option<Assignment<V>> {
    report.completeness_checks += 1;
    if problem.is_complete(&assignment) {
        return Some(assignment);
    }

    let variable = minimum_remaining_values(problem, &domains)?;
    for value in least_restraining_values(problem, variable, &domains) {
        report.assignments_tried += 1;
        let mut child_domains = domains.clone();
        child_domains.remove(variable);
        if !forward_checking(problem, variable, &value, &mut child_domains) {
            report.forward_check_failures += 1;
            continue;
        }
        let mut child = assignment.clone();
        child.insert(variable.to_string(), value);
        if let Some(solution) = backtrack(problem, child, child_domains, report) {
            return Some(solution);
        }
    }
    None
}
