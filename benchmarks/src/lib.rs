//! Shared workloads for the athena benchmark suites.
//!
//! Every builder is deterministic: the same arguments produce the same world.

use std::fmt::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use athena_csp::problem::{Constraint, CspProblem};
use athena_harness::contract::WorldSource;
use athena_harness::worlds::graph::GraphProblem;
use athena_harness::worlds::tree_game::TreeGame;

/// A `side x side` 4-connected grid with unit costs, start in one corner
/// and goal in the opposite one. The heuristic table holds the Manhattan
/// distance to the goal.
#[must_use]
pub fn grid_graph(side: u32) -> GraphProblem {
    let name = |x: u32, y: u32| format!("{x}_{y}");
    let last = side.saturating_sub(1);
    let mut graph = GraphProblem {
        start: name(0, 0),
        ..GraphProblem::default()
    };
    graph.goals.insert(name(last, last));
    for x in 0..side {
        for y in 0..side {
            if x + 1 < side {
                graph.add_edge(&name(x, y), &name(x + 1, y), 1.0);
            }
            if y + 1 < side {
                graph.add_edge(&name(x, y), &name(x, y + 1), 1.0);
            }
            graph
                .heuristic
                .insert(name(x, y), f64::from((last - x) + (last - y)));
        }
    }
    graph
}

/// Random complete game tree in the `TreeGame` JSON form. Turns alternate
/// between agent 0 and agent 1; leaf utilities and interior heuristics are
/// drawn from `seed`.
///
/// # Panics
///
/// Panics if the generated JSON does not load, which would be a bug in this
/// builder. Benchmark setup failures are fatal.
#[must_use]
pub fn random_tree_game(branching: usize, depth: usize, seed: u64) -> TreeGame {
    fn node(out: &mut String, rng: &mut SmallRng, branching: usize, level: usize, depth: usize) {
        if level == depth {
            let _ = write!(out, "{{\"values\":[{}]}}", rng.gen_range(-50i32..=50));
            return;
        }
        let _ = write!(
            out,
            "{{\"turn\":{},\"heuristic\":{},\"children\":{{",
            level % 2,
            rng.gen_range(-50i32..=50)
        );
        for child in 0..branching {
            if child > 0 {
                out.push(',');
            }
            let _ = write!(out, "\"m{child}\":");
            node(out, rng, branching, level + 1, depth);
        }
        out.push_str("}}");
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut text = String::new();
    node(&mut text, &mut rng, branching, 0, depth);
    TreeGame::from_text(&text).expect("generated tree loads")
}

/// Three-colouring of a ring of `regions` regions with a chord from every
/// region to the one `regions / 3` steps ahead.
#[must_use]
pub fn ring_coloring(regions: usize) -> CspProblem<u8> {
    let name = |i: usize| format!("r{i}");
    let mut problem = CspProblem::default();
    for i in 0..regions {
        problem.add_variable(name(i), [0u8, 1, 2]);
    }
    let chord = (regions / 3).max(2);
    for i in 0..regions {
        for step in [1, chord] {
            let j = (i + step) % regions;
            if j != i {
                problem.add_constraint(Constraint::binary(name(i), name(j), |a: &u8, b: &u8| a != b));
            }
        }
    }
    problem.add_constraint(Constraint::unary(name(0), |v: &u8| *v == 0));
    problem
}
