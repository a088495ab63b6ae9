//! Shared fixtures for the lock tests and the `suite_fixture` binary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use athena_games::contract::Game;
use athena_harness::worlds::graph::GraphProblem;

/// Two routes from A to D; the cheaper one has more edges.
pub const DIAMOND: &str = "\
start A
goal D
edge A B 1
edge B C 1
edge C D 1
edge A D 5
h A 3
h B 2
h C 1
";

pub const SEND_MORE_MONEY: &str = "SEND + MORE = MONEY";

/// One car that must go around a wall; the short way crosses car B's slot.
pub const DETOUR_PARKING: &str = "
#######
#A.1..#
#.###.#
#.....#
###0###
#######
";

/// Workspace root, two levels above this crate's manifest.
#[must_use]
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// The checked-in suite exercised by the cross-process determinism test.
#[must_use]
pub fn suite_fixture_path() -> PathBuf {
    workspace_root().join("tests/fixtures/suite.json")
}

/// Undirected graph over `n0..n{count-1}` with start `n0` and goal
/// `n{count-1}`. Edge endpoints are taken modulo `count`; self-loops are
/// dropped.
#[must_use]
pub fn numbered_graph(count: usize, edges: &[(usize, usize, u8)]) -> GraphProblem {
    let name = |i: usize| format!("n{i}");
    let mut graph = GraphProblem {
        start: name(0),
        ..GraphProblem::default()
    };
    graph.goals.insert(name(count.saturating_sub(1)));
    for &(a, b, cost) in edges {
        let (a, b) = (a % count, b % count);
        if a != b {
            graph.add_edge(&name(a), &name(b), f64::from(cost));
        }
    }
    graph
}

/// Exact cheapest cost from every node that can reach a goal.
#[must_use]
pub fn exact_costs_to_goal(graph: &GraphProblem) -> BTreeMap<String, f64> {
    let mut costs: BTreeMap<String, f64> =
        graph.goals.iter().map(|goal| (goal.clone(), 0.0)).collect();
    loop {
        let mut changed = false;
        for (from, out) in &graph.adjacency {
            for (to, cost) in out {
                let Some(&rest) = costs.get(to) else { continue };
                let candidate = cost + rest;
                if !costs.get(from).is_some_and(|&known| known <= candidate) {
                    costs.insert(from.clone(), candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            return costs;
        }
    }
}

/// Install `factor * exact cost` as the table heuristic. Any factor in
/// `[0, 1]` gives a consistent heuristic.
#[must_use]
pub fn with_scaled_heuristic(mut graph: GraphProblem, factor: f64) -> GraphProblem {
    graph.heuristic = exact_costs_to_goal(&graph)
        .into_iter()
        .map(|(node, cost)| (node, cost * factor))
        .collect();
    graph
}

/// Complete game tree of uniform branching. `turns[level]` is the agent to
/// move at that level and `leaves` holds `branching^depth` utilities for
/// agent 0 in left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformTree {
    pub branching: usize,
    pub depth: usize,
    pub turns: Vec<usize>,
    pub leaves: Vec<f64>,
}

impl UniformTree {
    #[must_use]
    pub fn root() -> (usize, usize) {
        (0, 0)
    }
}

/// Deterministic, state-dependent estimate for depth-limited searches.
#[must_use]
pub fn uniform_tree_estimate(_tree: &UniformTree, state: &(usize, usize), _agent: usize) -> f64 {
    let (level, index) = *state;
    let bucket = u8::try_from((level * 3 + index * 7) % 11).unwrap_or(0);
    f64::from(bucket) - 5.0
}

impl Game for UniformTree {
    /// `(level, index within level)`.
    type State = (usize, usize);
    type Action = usize;

    fn turn(&self, state: &(usize, usize)) -> usize {
        self.turns.get(state.0).copied().unwrap_or(0)
    }

    fn is_terminal(&self, state: &(usize, usize)) -> Option<Vec<f64>> {
        (state.0 >= self.depth).then(|| vec![self.leaves.get(state.1).copied().unwrap_or(0.0)])
    }

    fn actions(&self, state: &(usize, usize)) -> Vec<usize> {
        if state.0 >= self.depth {
            Vec::new()
        } else {
            (0..self.branching).collect()
        }
    }

    fn successor(&self, state: &(usize, usize), action: &usize) -> (usize, usize) {
        (state.0 + 1, state.1 * self.branching + action)
    }
}
