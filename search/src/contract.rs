//! Search problem contract.

use std::hash::Hash;

/// A state space that graph search can explore.
///
/// # Contract
///
/// - States are immutable values: `successor` returns a new state and must not
///   observe or depend on previously returned states.
/// - `actions` must be deterministic: same state → same actions in the same
///   order. Search tie-breaking relies on generation order.
/// - `cost` must be non-negative for the optimality guarantees of uniform-cost
///   and A* search to hold.
pub trait Problem {
    /// Opaque, hashable state value.
    type State: Clone + Eq + Hash;
    /// Opaque action value.
    type Action: Clone;

    /// The state the problem starts from.
    fn initial_state(&self) -> Self::State;

    /// Test whether the given state satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Enumerate the legal actions from `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `action` in `state`.
    fn successor(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// The cost of applying `action` in `state`.
    fn cost(&self, state: &Self::State, action: &Self::Action) -> f64;
}

// Heuristics are any `Fn(&P, &P::State) -> f64` estimating the remaining cost
// from a state to the nearest goal. A* is optimal when the estimate is
// admissible and consistent.

/// The heuristic that knows nothing. Admissible and consistent for every
/// problem with non-negative costs.
#[must_use]
pub fn zero_heuristic<P: Problem>(_problem: &P, _state: &P::State) -> f64 {
    0.0
}
