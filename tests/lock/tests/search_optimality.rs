//! Graph search lock tests.
//!
//! - UCS and A* (consistent heuristic) return minimum-cost paths.
//! - BFS returns a path with the fewest actions.
//! - Every reported `solution_cost` equals the cost of replaying the path.
//! - Uninformed searches are unaffected by the heuristic table.

use athena_harness::contract::WorldSource;
use athena_harness::worlds::graph::{graph_heuristic, GraphProblem};
use athena_harness::worlds::parking::{parking_heuristic, ParkingProblem};
use athena_search::contract::Problem;
use athena_search::policy::{Algorithm, SearchPolicy};
use athena_search::search::{path_cost, replay, search, SearchResult};
use lock_tests::{
    exact_costs_to_goal, numbered_graph, with_scaled_heuristic, DETOUR_PARKING, DIAMOND,
};
use proptest::prelude::*;

fn run(graph: &GraphProblem, algorithm: Algorithm) -> SearchResult<String> {
    search(
        graph,
        &graph.start,
        algorithm,
        graph_heuristic,
        &SearchPolicy::default(),
    )
    .unwrap()
}

fn cost_of(result: &SearchResult<String>) -> Option<f64> {
    result.report.solution_cost
}

// --- Diamond ---

#[test]
fn diamond_costs_per_algorithm() {
    let graph = GraphProblem::from_text(DIAMOND).unwrap();

    let ucs = run(&graph, Algorithm::UniformCost);
    assert_eq!(ucs.solution.as_deref(), Some(&["B".to_string(), "C".into(), "D".into()][..]));
    assert_eq!(cost_of(&ucs), Some(3.0));
    assert_eq!(cost_of(&run(&graph, Algorithm::AStar)), Some(3.0));

    let bfs = run(&graph, Algorithm::BreadthFirst);
    assert_eq!(bfs.solution, Some(vec!["D".to_string()]));
    assert_eq!(cost_of(&bfs), Some(5.0));

    for algorithm in Algorithm::ALL {
        let result = run(&graph, algorithm);
        let path = result.solution.as_ref().unwrap();
        assert!(graph.is_goal(&replay(&graph, &graph.start, path)), "{algorithm:?}");
        assert_eq!(
            cost_of(&result),
            Some(path_cost(&graph, &graph.start, path)),
            "{algorithm:?}"
        );
    }
}

#[test]
fn diamond_reports_are_deterministic() {
    let graph = GraphProblem::from_text(DIAMOND).unwrap();
    for algorithm in Algorithm::ALL {
        let first = run(&graph, algorithm).report.digest().unwrap();
        for _ in 0..10 {
            assert_eq!(run(&graph, algorithm).report.digest().unwrap(), first);
        }
    }
}

// --- Parking ---

#[test]
fn parking_detour_is_optimal_for_ucs_and_astar() {
    let problem = ParkingProblem::from_text(DETOUR_PARKING).unwrap();
    let initial = problem.initial_state();
    for algorithm in [Algorithm::UniformCost, Algorithm::AStar] {
        let result = search(
            &problem,
            &initial,
            algorithm,
            parking_heuristic,
            &SearchPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.report.solution_cost, Some(5.0), "{algorithm:?}");
        let path = result.solution.unwrap();
        assert!(problem.is_goal(&replay(&problem, &initial, &path)));
    }
}

#[test]
fn parking_budget_stops_without_solution() {
    let problem = ParkingProblem::from_text(DETOUR_PARKING).unwrap();
    let result = search(
        &problem,
        &problem.initial_state(),
        Algorithm::UniformCost,
        parking_heuristic,
        &SearchPolicy::with_max_expansions(2),
    )
    .unwrap();
    assert!(result.solution.is_none());
    assert!(!result.is_goal_reached());
    assert_eq!(result.report.total_expansions, 2);
}

// --- Random graphs ---

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u8)>, f64)> {
    (
        2usize..9,
        prop::collection::vec((0usize..9, 0usize..9, 1u8..10), 0..20),
        0.0f64..=1.0,
    )
}

proptest! {
    #[test]
    fn astar_matches_ucs_cost((count, edges, factor) in graph_strategy()) {
        let graph = with_scaled_heuristic(numbered_graph(count, &edges), factor);
        let exact = exact_costs_to_goal(&graph).get(&graph.start).copied();

        let ucs = run(&graph, Algorithm::UniformCost);
        let astar = run(&graph, Algorithm::AStar);
        prop_assert_eq!(cost_of(&ucs), exact);
        prop_assert_eq!(cost_of(&astar), exact);
    }

    #[test]
    fn bfs_path_has_fewest_actions((count, edges, _factor) in graph_strategy()) {
        let graph = numbered_graph(count, &edges);
        let bfs = run(&graph, Algorithm::BreadthFirst);
        for algorithm in Algorithm::ALL {
            let other = run(&graph, algorithm);
            prop_assert_eq!(other.solution.is_some(), bfs.solution.is_some());
            if let (Some(short), Some(path)) = (&bfs.solution, &other.solution) {
                prop_assert!(short.len() <= path.len());
            }
        }
    }

    #[test]
    fn reported_cost_matches_replay((count, edges, factor) in graph_strategy()) {
        let graph = with_scaled_heuristic(numbered_graph(count, &edges), factor);
        for algorithm in Algorithm::ALL {
            let result = run(&graph, algorithm);
            if let Some(path) = &result.solution {
                prop_assert!(graph.is_goal(&replay(&graph, &graph.start, path)));
                prop_assert_eq!(
                    cost_of(&result),
                    Some(path_cost(&graph, &graph.start, path))
                );
                prop_assert_eq!(result.report.solution_length, Some(path.len()));
            }
        }
    }

    #[test]
    fn uninformed_search_ignores_heuristic((count, edges, factor) in graph_strategy()) {
        let plain = numbered_graph(count, &edges);
        let informed = with_scaled_heuristic(plain.clone(), factor);
        for algorithm in [Algorithm::BreadthFirst, Algorithm::DepthFirst, Algorithm::UniformCost] {
            prop_assert_eq!(run(&plain, algorithm).solution, run(&informed, algorithm).solution);
        }
    }
}
