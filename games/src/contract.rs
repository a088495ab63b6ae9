//! The `Game` capability set.

/// A turn-based game with any number of agents.
///
/// Implementations must be deterministic: the same state and action always
/// produce the same successor.
pub trait Game {
    type State: Clone;
    type Action: Clone;

    /// Index of the agent to move in `state`. Agent 0 maximizes.
    fn turn(&self, state: &Self::State) -> usize;

    /// `Some(values)` with one utility per agent if `state` is terminal.
    /// Searches read `values[0]`.
    fn is_terminal(&self, state: &Self::State) -> Option<Vec<f64>>;

    /// Legal actions in `state`, in generation order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn successor(&self, state: &Self::State, action: &Self::Action) -> Self::State;
}

// Heuristics are any `Fn(&G, &G::State, usize) -> f64` scoring a state for
// the given agent.

/// A heuristic that scores every state 0.
pub fn zero_heuristic<G: Game>(_game: &G, _state: &G::State, _agent: usize) -> f64 {
    0.0
}
