//! Search entry points and the expansion loop.
//!
//! One loop drives every algorithm; the algorithm only selects the frontier
//! discipline, the priority of a node and when the goal test happens:
//!
//! | Algorithm | Frontier | Priority | Goal test |
//! |---|---|---|---|
//! | breadth-first | FIFO | none | on generation |
//! | depth-first | LIFO | none | on expansion |
//! | uniform-cost | min-heap | `g` | on expansion |
//! | A* | min-heap | `g + h` | on expansion |
//! | best-first | min-heap | `h` | on expansion |
//!
//! Every algorithm keeps an explored set and never expands a state twice.

use std::collections::HashSet;

use athena_kernel::cost::Cost;

use crate::contract::{zero_heuristic, Problem};
use crate::error::SearchError;
use crate::frontier::SearchFrontier;
use crate::node::{reconstruct_path, FrontierKey, SearchNode};
use crate::policy::{Algorithm, SearchPolicy};
use crate::report::{SearchReport, TerminationReason};

/// An action path from the initial state to a goal, or `None` when no goal
/// is reachable.
pub type Solution<A> = Option<Vec<A>>;

/// Result of a search execution.
///
/// Always carries a [`SearchReport`], whatever the outcome.
#[derive(Debug)]
pub struct SearchResult<A> {
    /// The action path (if a goal was reached).
    pub solution: Solution<A>,
    pub report: SearchReport,
}

impl<A> SearchResult<A> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.report.termination,
            TerminationReason::GoalReached { .. }
        )
    }
}

/// Run `algorithm` from `initial_state`.
///
/// Uninformed algorithms never call `heuristic`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures. "No solution" and budget exhaustion are reported
/// through [`SearchResult::report`], not as errors.
pub fn search<P, H>(
    problem: &P,
    initial_state: &P::State,
    algorithm: Algorithm,
    heuristic: H,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::Action>, SearchError>
where
    P: Problem,
    H: Fn(&P, &P::State) -> f64,
{
    policy.validate()?;
    Ok(run(problem, initial_state, algorithm, &heuristic, policy))
}

/// Breadth-first search. Optimal in the number of actions.
pub fn breadth_first_search<P: Problem>(
    problem: &P,
    initial_state: &P::State,
) -> Solution<P::Action> {
    run_unbounded(problem, initial_state, Algorithm::BreadthFirst, &zero_heuristic::<P>)
}

/// Depth-first search. Finds some path, not necessarily a short one.
pub fn depth_first_search<P: Problem>(
    problem: &P,
    initial_state: &P::State,
) -> Solution<P::Action> {
    run_unbounded(problem, initial_state, Algorithm::DepthFirst, &zero_heuristic::<P>)
}

/// Uniform-cost search. Optimal for non-negative action costs.
pub fn uniform_cost_search<P: Problem>(
    problem: &P,
    initial_state: &P::State,
) -> Solution<P::Action> {
    run_unbounded(problem, initial_state, Algorithm::UniformCost, &zero_heuristic::<P>)
}

/// A* search. Optimal when `heuristic` is admissible and consistent.
pub fn a_star_search<P, H>(problem: &P, initial_state: &P::State, heuristic: H) -> Solution<P::Action>
where
    P: Problem,
    H: Fn(&P, &P::State) -> f64,
{
    run_unbounded(problem, initial_state, Algorithm::AStar, &heuristic)
}

/// Greedy best-first search ordered by `heuristic` alone. Fast, not optimal.
pub fn best_first_search<P, H>(
    problem: &P,
    initial_state: &P::State,
    heuristic: H,
) -> Solution<P::Action>
where
    P: Problem,
    H: Fn(&P, &P::State) -> f64,
{
    run_unbounded(problem, initial_state, Algorithm::BestFirst, &heuristic)
}

/// Replay `actions` from `initial_state` and sum their costs.
pub fn path_cost<P: Problem>(problem: &P, initial_state: &P::State, actions: &[P::Action]) -> f64 {
    let mut state = initial_state.clone();
    let mut total = 0.0;
    for action in actions {
        total += problem.cost(&state, action);
        state = problem.successor(&state, action);
    }
    total
}

/// Replay `actions` from `initial_state` and return the final state.
pub fn replay<P: Problem>(problem: &P, initial_state: &P::State, actions: &[P::Action]) -> P::State {
    actions
        .iter()
        .fold(initial_state.clone(), |state, action| {
            problem.successor(&state, action)
        })
}

fn run_unbounded<P, H>(
    problem: &P,
    initial_state: &P::State,
    algorithm: Algorithm,
    heuristic: &H,
) -> Solution<P::Action>
where
    P: Problem,
    H: Fn(&P, &P::State) -> f64 + ?Sized,
{
    run(problem, initial_state, algorithm, heuristic, &SearchPolicy::default()).solution
}

fn run<P, H>(
    problem: &P,
    initial_state: &P::State,
    algorithm: Algorithm,
    heuristic: &H,
    policy: &SearchPolicy,
) -> SearchResult<P::Action>
where
    P: Problem,
    H: Fn(&P, &P::State) -> f64 + ?Sized,
{
    let mut run = SearchRun::new(problem, algorithm, heuristic);
    let termination = if algorithm == Algorithm::BreadthFirst {
        run.goal_test_on_generation(initial_state, policy)
    } else {
        run.goal_test_on_expansion(initial_state, policy)
    };
    run.finish(termination)
}

/// Owned, per-invocation search state: node arena, frontier, explored set
/// and counters. Nothing outlives the call.
struct SearchRun<'a, P: Problem, H: ?Sized> {
    problem: &'a P,
    heuristic: &'a H,
    algorithm: Algorithm,
    nodes: Vec<SearchNode<P::State, P::Action>>,
    frontier: SearchFrontier,
    explored: HashSet<P::State>,
    expansions: u64,
    goal_tests: u64,
    generated: u64,
    duplicates_suppressed: u64,
}

impl<'a, P, H> SearchRun<'a, P, H>
where
    P: Problem,
    H: Fn(&P, &P::State) -> f64 + ?Sized,
{
    fn new(problem: &'a P, algorithm: Algorithm, heuristic: &'a H) -> Self {
        Self {
            problem,
            heuristic,
            algorithm,
            nodes: Vec::new(),
            frontier: SearchFrontier::for_algorithm(algorithm),
            explored: HashSet::new(),
            expansions: 0,
            goal_tests: 0,
            generated: 0,
            duplicates_suppressed: 0,
        }
    }

    /// Breadth-first: a child is goal-tested as soon as it is generated, and
    /// children already explored or already queued are skipped.
    fn goal_test_on_generation(
        &mut self,
        initial_state: &P::State,
        policy: &SearchPolicy,
    ) -> TerminationReason {
        let root = self.add_root(initial_state.clone());
        if self.is_goal(root) {
            return TerminationReason::GoalReached { node_id: 0 };
        }

        let mut queued: HashSet<P::State> = HashSet::new();
        queued.insert(initial_state.clone());
        self.enqueue(root);

        loop {
            if policy.is_exhausted(self.expansions) {
                return TerminationReason::ExpansionBudgetExceeded;
            }
            let Some(current) = self.frontier.pop() else {
                return TerminationReason::FrontierExhausted;
            };
            let state = self.nodes[current].state.clone();
            queued.remove(&state);
            if !self.explored.insert(state) {
                continue;
            }
            self.expansions += 1;

            for (action, next) in self.successors(current) {
                self.generated += 1;
                if self.explored.contains(&next) || queued.contains(&next) {
                    self.duplicates_suppressed += 1;
                    continue;
                }
                let child = self.add_child(current, action, next.clone());
                if self.is_goal(child) {
                    return TerminationReason::GoalReached {
                        node_id: child as u64,
                    };
                }
                queued.insert(next);
                self.enqueue(child);
            }
        }
    }

    /// Depth-first, uniform-cost, A* and best-first: a node is goal-tested
    /// when it is popped. Stale frontier entries for already-explored states
    /// are discarded on pop.
    fn goal_test_on_expansion(
        &mut self,
        initial_state: &P::State,
        policy: &SearchPolicy,
    ) -> TerminationReason {
        let root = self.add_root(initial_state.clone());
        self.enqueue(root);

        loop {
            if policy.is_exhausted(self.expansions) {
                return TerminationReason::ExpansionBudgetExceeded;
            }
            let Some(current) = self.frontier.pop() else {
                return TerminationReason::FrontierExhausted;
            };
            if self.explored.contains(&self.nodes[current].state) {
                continue;
            }
            if self.is_goal(current) {
                return TerminationReason::GoalReached {
                    node_id: current as u64,
                };
            }
            self.explored.insert(self.nodes[current].state.clone());
            self.expansions += 1;

            for (action, next) in self.successors(current) {
                self.generated += 1;
                if self.explored.contains(&next) {
                    self.duplicates_suppressed += 1;
                    continue;
                }
                let child = self.add_child(current, action, next);
                self.enqueue(child);
            }
        }
    }

    fn is_goal(&mut self, node_id: usize) -> bool {
        self.goal_tests += 1;
        self.problem.is_goal(&self.nodes[node_id].state)
    }

    fn estimate(&self, state: &P::State) -> Cost {
        if self.algorithm.is_informed() {
            Cost((self.heuristic)(self.problem, state))
        } else {
            Cost::ZERO
        }
    }

    fn priority(&self, node: &SearchNode<P::State, P::Action>) -> Cost {
        match self.algorithm {
            Algorithm::UniformCost => node.g_cost,
            Algorithm::AStar => node.f_cost(),
            Algorithm::BestFirst => node.h_cost,
            Algorithm::BreadthFirst | Algorithm::DepthFirst => Cost::ZERO,
        }
    }

    fn successors(&self, node_id: usize) -> Vec<(P::Action, P::State)> {
        let state = &self.nodes[node_id].state;
        self.problem
            .actions(state)
            .into_iter()
            .map(|action| {
                let next = self.problem.successor(state, &action);
                (action, next)
            })
            .collect()
    }

    fn add_root(&mut self, state: P::State) -> usize {
        let h_cost = self.estimate(&state);
        self.nodes.push(SearchNode::root(state, h_cost));
        0
    }

    fn add_child(&mut self, parent_id: usize, action: P::Action, state: P::State) -> usize {
        let parent = &self.nodes[parent_id];
        let g_cost = parent.g_cost + Cost(self.problem.cost(&parent.state, &action));
        let h_cost = self.estimate(&state);
        let node_id = self.nodes.len();
        self.nodes.push(SearchNode {
            parent_id: Some(parent_id),
            state,
            g_cost,
            h_cost,
            producing_action: Some(action),
        });
        node_id
    }

    fn enqueue(&mut self, node_id: usize) {
        let key = FrontierKey {
            priority: self.priority(&self.nodes[node_id]),
            creation_order: node_id as u64,
        };
        self.frontier.push(node_id, key);
    }

    fn finish(self, termination: TerminationReason) -> SearchResult<P::Action> {
        let goal_id = match termination {
            TerminationReason::GoalReached { node_id } => usize::try_from(node_id).ok(),
            TerminationReason::FrontierExhausted | TerminationReason::ExpansionBudgetExceeded => {
                None
            }
        };
        let solution = goal_id.map(|id| reconstruct_path(&self.nodes, id));
        let report = SearchReport {
            algorithm: self.algorithm,
            termination,
            total_expansions: self.expansions,
            total_goal_tests: self.goal_tests,
            total_generated: self.generated,
            total_duplicates_suppressed: self.duplicates_suppressed,
            frontier_high_water: self.frontier.high_water(),
            solution_cost: goal_id
                .and_then(|id| self.nodes.get(id))
                .map(|node| node.g_cost.value()),
            solution_length: solution.as_ref().map(Vec::len),
        };
        SearchResult { solution, report }
    }
}
