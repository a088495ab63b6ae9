//! Game-tree searches: greedy, minimax, alpha-beta (plain and move
//! ordered) and expectimax.
//!
//! All tree searches share one leaf contract:
//!
//! - a terminal state is worth `values[0]`;
//! - at the depth cutoff, a state is worth `h(state, agent)` when agent 0
//!   moves and `-h(state, agent)` otherwise;
//! - a non-terminal state without legal actions is scored like a cutoff.
//!
//! Ties keep the first action in iteration order.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::contract::Game;
use crate::policy::{DepthLimit, GameSearchKind};
use crate::report::{Decision, TreeStats};

/// One ply: score every successor with `heuristic` for the agent to move
/// and pick the best. Ties go to the first generated action.
pub fn greedy<G, H>(game: &G, state: &G::State, heuristic: H) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
{
    let mut stats = TreeStats {
        nodes_visited: 1,
        ..TreeStats::default()
    };
    let agent = game.turn(state);
    if let Some(values) = game.is_terminal(state) {
        stats.leaves_evaluated += 1;
        return Decision {
            value: agent_zero_value(&values),
            action: None,
            stats,
        };
    }

    let mut best: Option<(f64, G::Action)> = None;
    for action in game.actions(state) {
        let child = game.successor(state, &action);
        stats.nodes_visited += 1;
        stats.leaves_evaluated += 1;
        let value = heuristic(game, &child, agent);
        if improves(true, value, best.as_ref().map(|(b, _)| *b)) {
            best = Some((value, action));
        }
    }
    match best {
        Some((value, action)) => Decision {
            value,
            action: Some(action),
            stats,
        },
        None => {
            stats.leaves_evaluated += 1;
            Decision {
                value: heuristic(game, state, agent),
                action: None,
                stats,
            }
        }
    }
}

/// Minimax: agent 0 maximizes, every other agent minimizes agent 0's value.
pub fn minimax<G, H>(
    game: &G,
    state: &G::State,
    heuristic: H,
    max_depth: DepthLimit,
) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
{
    let mut tree = TreeSearch::new(game, &heuristic);
    let (value, action) = tree.minimax(state, max_depth);
    tree.decide(value, action)
}

/// Minimax with alpha-beta pruning. Same value as [`minimax`], fewer nodes.
pub fn alphabeta<G, H>(
    game: &G,
    state: &G::State,
    heuristic: H,
    max_depth: DepthLimit,
) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
{
    let mut tree = TreeSearch::new(game, &heuristic);
    let (value, action) =
        tree.alphabeta(state, max_depth, f64::NEG_INFINITY, f64::INFINITY, false);
    tree.decide(value, action)
}

/// Alpha-beta that visits successors best-first by heuristic: descending at
/// agent 0's nodes, ascending elsewhere, scored from agent 0's perspective.
/// The order only affects how much is pruned.
pub fn alphabeta_with_move_ordering<G, H>(
    game: &G,
    state: &G::State,
    heuristic: H,
    max_depth: DepthLimit,
) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
{
    let mut tree = TreeSearch::new(game, &heuristic);
    let (value, action) = tree.alphabeta(state, max_depth, f64::NEG_INFINITY, f64::INFINITY, true);
    tree.decide(value, action)
}

/// Expectimax with an entropy-seeded random source for chance-node actions.
pub fn expectimax<G, H>(
    game: &G,
    state: &G::State,
    heuristic: H,
    max_depth: DepthLimit,
) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
{
    let mut rng = SmallRng::from_entropy();
    expectimax_with_rng(game, state, heuristic, max_depth, &mut rng)
}

/// Expectimax: agent 0 maximizes, every other agent is a chance node worth
/// the mean of its children. The action reported at a chance node is drawn
/// uniformly from `rng`.
pub fn expectimax_with_rng<G, H, R>(
    game: &G,
    state: &G::State,
    heuristic: H,
    max_depth: DepthLimit,
    rng: &mut R,
) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
    R: Rng + ?Sized,
{
    let mut tree = TreeSearch::new(game, &heuristic);
    let (value, action) = tree.expectimax(state, max_depth, rng);
    tree.decide(value, action)
}

/// Run the search named by `kind`. `rng` is used by expectimax only and
/// `max_depth` is ignored by greedy.
pub fn run_game_search<G, H, R>(
    kind: GameSearchKind,
    game: &G,
    state: &G::State,
    heuristic: H,
    max_depth: DepthLimit,
    rng: &mut R,
) -> Decision<G::Action>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64,
    R: Rng + ?Sized,
{
    match kind {
        GameSearchKind::Greedy => greedy(game, state, heuristic),
        GameSearchKind::Minimax => minimax(game, state, heuristic, max_depth),
        GameSearchKind::AlphaBeta => alphabeta(game, state, heuristic, max_depth),
        GameSearchKind::AlphaBetaOrdered => {
            alphabeta_with_move_ordering(game, state, heuristic, max_depth)
        }
        GameSearchKind::Expectimax => expectimax_with_rng(game, state, heuristic, max_depth, rng),
    }
}

fn agent_zero_value(values: &[f64]) -> f64 {
    values.first().copied().unwrap_or_default()
}

/// How a state is treated by the recursion.
enum Node<A> {
    Leaf(f64),
    Interior { agent: usize, actions: Vec<A> },
}

struct TreeSearch<'a, G, H: ?Sized> {
    game: &'a G,
    heuristic: &'a H,
    stats: TreeStats,
}

impl<'a, G, H> TreeSearch<'a, G, H>
where
    G: Game,
    H: Fn(&G, &G::State, usize) -> f64 + ?Sized,
{
    fn new(game: &'a G, heuristic: &'a H) -> Self {
        Self {
            game,
            heuristic,
            stats: TreeStats::default(),
        }
    }

    fn decide(self, value: f64, action: Option<G::Action>) -> Decision<G::Action> {
        Decision {
            value,
            action,
            stats: self.stats,
        }
    }

    fn classify(&mut self, state: &G::State, depth: DepthLimit) -> Node<G::Action> {
        self.stats.nodes_visited += 1;
        let agent = self.game.turn(state);
        if let Some(values) = self.game.is_terminal(state) {
            self.stats.leaves_evaluated += 1;
            return Node::Leaf(agent_zero_value(&values));
        }
        if depth.is_cutoff() {
            return Node::Leaf(self.cutoff_value(state, agent));
        }
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Node::Leaf(self.cutoff_value(state, agent));
        }
        Node::Interior { agent, actions }
    }

    fn cutoff_value(&mut self, state: &G::State, agent: usize) -> f64 {
        self.stats.leaves_evaluated += 1;
        let h = (self.heuristic)(self.game, state, agent);
        if agent == 0 {
            h
        } else {
            -h
        }
    }

    fn minimax(&mut self, state: &G::State, depth: DepthLimit) -> (f64, Option<G::Action>) {
        let (agent, actions) = match self.classify(state, depth) {
            Node::Leaf(value) => return (value, None),
            Node::Interior { agent, actions } => (agent, actions),
        };
        let maximizing = agent == 0;
        let mut best: Option<(f64, G::Action)> = None;
        for action in actions {
            let child = self.game.successor(state, &action);
            let (value, _) = self.minimax(&child, depth.descend());
            if improves(maximizing, value, best.as_ref().map(|(b, _)| *b)) {
                best = Some((value, action));
            }
        }
        split(best)
    }

    fn alphabeta(
        &mut self,
        state: &G::State,
        depth: DepthLimit,
        mut alpha: f64,
        mut beta: f64,
        ordered: bool,
    ) -> (f64, Option<G::Action>) {
        let (agent, actions) = match self.classify(state, depth) {
            Node::Leaf(value) => return (value, None),
            Node::Interior { agent, actions } => (agent, actions),
        };
        let maximizing = agent == 0;
        let mut successors: Vec<(G::Action, G::State)> = actions
            .into_iter()
            .map(|action| {
                let child = self.game.successor(state, &action);
                (action, child)
            })
            .collect();
        if ordered {
            self.order(&mut successors, maximizing);
        }

        let remaining = successors.len();
        let mut best: Option<(f64, G::Action)> = None;
        for (index, (action, child)) in successors.into_iter().enumerate() {
            let (value, _) = self.alphabeta(&child, depth.descend(), alpha, beta, ordered);
            if improves(maximizing, value, best.as_ref().map(|(b, _)| *b)) {
                best = Some((value, action));
            }
            let current = best.as_ref().map_or(value, |(b, _)| *b);
            let prune = if maximizing {
                alpha = alpha.max(current);
                current >= beta
            } else {
                beta = beta.min(current);
                current <= alpha
            };
            if prune {
                if index + 1 < remaining {
                    self.stats.cutoffs += 1;
                }
                break;
            }
        }
        split(best)
    }

    /// Stable sort by agent 0's heuristic of each successor.
    fn order(&self, successors: &mut Vec<(G::Action, G::State)>, maximizing: bool) {
        let mut keyed: Vec<(f64, (G::Action, G::State))> = successors
            .drain(..)
            .map(|pair| ((self.heuristic)(self.game, &pair.1, 0), pair))
            .collect();
        if maximizing {
            keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
        } else {
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        successors.extend(keyed.into_iter().map(|(_, pair)| pair));
    }

    fn expectimax<R: Rng + ?Sized>(
        &mut self,
        state: &G::State,
        depth: DepthLimit,
        rng: &mut R,
    ) -> (f64, Option<G::Action>) {
        let (agent, actions) = match self.classify(state, depth) {
            Node::Leaf(value) => return (value, None),
            Node::Interior { agent, actions } => (agent, actions),
        };
        if agent == 0 {
            let mut best: Option<(f64, G::Action)> = None;
            for action in actions {
                let child = self.game.successor(state, &action);
                let (value, _) = self.expectimax(&child, depth.descend(), rng);
                if improves(true, value, best.as_ref().map(|(b, _)| *b)) {
                    best = Some((value, action));
                }
            }
            return split(best);
        }

        let mut total = 0.0;
        for action in &actions {
            let child = self.game.successor(state, action);
            total += self.expectimax(&child, depth.descend(), rng).0;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = total / actions.len() as f64;
        let pick = rng.gen_range(0..actions.len());
        (mean, actions.into_iter().nth(pick))
    }
}

/// Strict improvement, so ties keep the earlier action.
fn improves(maximizing: bool, value: f64, best: Option<f64>) -> bool {
    match best {
        None => true,
        Some(b) if maximizing => value > b,
        Some(b) => value < b,
    }
}

fn split<A>(best: Option<(f64, A)>) -> (f64, Option<A>) {
    match best {
        Some((value, action)) => (value, Some(action)),
        None => (0.0, None),
    }
}
