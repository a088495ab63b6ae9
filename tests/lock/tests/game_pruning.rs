//! Game search lock tests.
//!
//! - Alpha-beta, with and without move ordering, returns the minimax value
//!   and never evaluates more leaves than minimax.
//! - Plain alpha-beta recommends the same root action as minimax.
//! - Move-ordered alpha-beta recommends an action whose subtree has the
//!   minimax value, even when ties let it pick a different action.
//! - Expectimax equals minimax when agent 0 moves at every level.
//! - Depth cutoffs score with the heuristic, negated for agents other than 0.

use athena_games::contract::Game;
use athena_games::policy::{DepthLimit, GameSearchKind};
use athena_games::search::{
    alphabeta, alphabeta_with_move_ordering, expectimax_with_rng, minimax, run_game_search,
};
use lock_tests::{uniform_tree_estimate, UniformTree};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn textbook() -> UniformTree {
    UniformTree {
        branching: 3,
        depth: 2,
        turns: vec![0, 1],
        leaves: vec![3.0, 12.0, 8.0, 2.0, 4.0, 6.0, 14.0, 5.0, 2.0],
    }
}

#[test]
fn textbook_tree_prunes_one_subtree() {
    let tree = textbook();
    let root = UniformTree::root();
    let plain = minimax(&tree, &root, uniform_tree_estimate, DepthLimit::Unbounded);
    let pruned = alphabeta(&tree, &root, uniform_tree_estimate, DepthLimit::Unbounded);

    assert_eq!(plain.value, 3.0);
    assert_eq!(plain.action, Some(0));
    assert_eq!(plain.stats.leaves_evaluated, 9);
    assert_eq!(plain.stats.cutoffs, 0);

    assert_eq!(pruned.value, 3.0);
    assert_eq!(pruned.action, Some(0));
    assert_eq!(pruned.stats.leaves_evaluated, 7);
    assert_eq!(pruned.stats.cutoffs, 1);
}

#[test]
fn ordering_may_break_ties_toward_another_optimal_action() {
    let tree = UniformTree {
        branching: 2,
        depth: 1,
        turns: vec![0],
        leaves: vec![4.0, 4.0],
    };
    let root = UniformTree::root();
    let plain = minimax(&tree, &root, uniform_tree_estimate, DepthLimit::Unbounded);
    let ordered =
        alphabeta_with_move_ordering(&tree, &root, uniform_tree_estimate, DepthLimit::Unbounded);

    assert_eq!(plain.action, Some(0));
    assert_eq!(ordered.action, Some(1));
    assert_eq!(ordered.value, plain.value);
    let child = tree.successor(&root, &1);
    assert_eq!(tree.is_terminal(&child), Some(vec![4.0]));
}

#[test]
fn every_kind_runs_through_dispatch() {
    let tree = textbook();
    let root = UniformTree::root();
    let mut rng = SmallRng::seed_from_u64(11);
    for kind in GameSearchKind::ALL {
        let decision = run_game_search(
            kind,
            &tree,
            &root,
            uniform_tree_estimate,
            DepthLimit::Unbounded,
            &mut rng,
        );
        assert!(decision.action.is_some(), "{kind:?}");
        assert!(decision.stats.nodes_visited > 0, "{kind:?}");
    }
}

#[test]
fn cutoff_negates_estimate_for_minimizer() {
    let tree = textbook();
    let root = UniformTree::root();
    let one_ply = minimax(&tree, &root, uniform_tree_estimate, DepthLimit::Plies(1));
    let expected = (0..3)
        .map(|i| -uniform_tree_estimate(&tree, &(1, i), 1))
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(one_ply.value, expected);
    assert_eq!(one_ply.stats.leaves_evaluated, 3);

    let zero_ply = minimax(&tree, &root, uniform_tree_estimate, DepthLimit::Plies(0));
    assert_eq!(zero_ply.value, uniform_tree_estimate(&tree, &root, 0));
    assert_eq!(zero_ply.action, None);
}

fn tree_strategy() -> impl Strategy<Value = (UniformTree, i64)> {
    (1usize..4, 0usize..5)
        .prop_flat_map(|(branching, depth)| {
            (
                Just(branching),
                Just(depth),
                prop::collection::vec(0usize..3, depth),
                prop::collection::vec(-9i8..10, branching.pow(u32::try_from(depth).unwrap())),
                -1i64..6,
            )
        })
        .prop_map(|(branching, depth, turns, leaves, max_depth)| {
            let tree = UniformTree {
                branching,
                depth,
                turns,
                leaves: leaves.into_iter().map(f64::from).collect(),
            };
            (tree, max_depth)
        })
}

proptest! {
    #[test]
    fn alphabeta_matches_minimax((tree, raw_depth) in tree_strategy()) {
        let depth = DepthLimit::from_raw(raw_depth).unwrap();
        let root = UniformTree::root();
        let plain = minimax(&tree, &root, uniform_tree_estimate, depth);
        let pruned = alphabeta(&tree, &root, uniform_tree_estimate, depth);
        let ordered = alphabeta_with_move_ordering(&tree, &root, uniform_tree_estimate, depth);

        prop_assert_eq!(pruned.value, plain.value);
        prop_assert_eq!(pruned.action, plain.action);
        prop_assert_eq!(ordered.value, plain.value);
        prop_assert_eq!(ordered.action.is_some(), plain.action.is_some());
        if let Some(action) = &ordered.action {
            let child = tree.successor(&root, action);
            let subtree = minimax(&tree, &child, uniform_tree_estimate, depth.descend());
            prop_assert_eq!(subtree.value, plain.value);
        }
        prop_assert!(pruned.stats.leaves_evaluated <= plain.stats.leaves_evaluated);
        prop_assert!(ordered.stats.leaves_evaluated <= plain.stats.leaves_evaluated);
        prop_assert_eq!(plain.stats.cutoffs, 0);
    }

    #[test]
    fn expectimax_is_minimax_without_opponents((tree, raw_depth) in tree_strategy(), seed in any::<u64>()) {
        let tree = UniformTree { turns: vec![0; tree.depth], ..tree };
        let depth = DepthLimit::from_raw(raw_depth).unwrap();
        let root = UniformTree::root();
        let mut rng = SmallRng::seed_from_u64(seed);
        let chance = expectimax_with_rng(&tree, &root, uniform_tree_estimate, depth, &mut rng);
        let plain = minimax(&tree, &root, uniform_tree_estimate, depth);
        prop_assert_eq!(chance.value, plain.value);
        prop_assert_eq!(chance.action, plain.action);
    }

    #[test]
    fn expectimax_value_ignores_seed((tree, raw_depth) in tree_strategy(), a in any::<u64>(), b in any::<u64>()) {
        let depth = DepthLimit::from_raw(raw_depth).unwrap();
        let root = UniformTree::root();
        let first = expectimax_with_rng(&tree, &root, uniform_tree_estimate, depth, &mut SmallRng::seed_from_u64(a));
        let second = expectimax_with_rng(&tree, &root, uniform_tree_estimate, depth, &mut SmallRng::seed_from_u64(b));
        prop_assert_eq!(first.value, second.value);
        prop_assert_eq!(first.stats, second.stats);
    }
}
