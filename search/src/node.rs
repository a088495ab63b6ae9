//! Search nodes and the frontier ordering key.

use athena_kernel::cost::Cost;

/// A node in the search arena.
///
/// Nodes are never mutated after creation. The action path to a node is
/// recovered by following `parent_id` links (see [`reconstruct_path`]), so a
/// node stores only the action that produced it.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// Parent node index (`None` for the root).
    pub parent_id: Option<usize>,
    /// The state at this node.
    pub state: S,
    /// Accumulated path cost from the root.
    pub g_cost: Cost,
    /// Heuristic estimate (zero for uninformed algorithms).
    pub h_cost: Cost,
    /// The action that produced this node from its parent.
    pub producing_action: Option<A>,
}

impl<S, A> SearchNode<S, A> {
    /// Create a root node.
    #[must_use]
    pub fn root(state: S, h_cost: Cost) -> Self {
        Self {
            parent_id: None,
            state,
            g_cost: Cost::ZERO,
            h_cost,
            producing_action: None,
        }
    }

    /// `f = g + h`.
    #[must_use]
    pub fn f_cost(&self) -> Cost {
        self.g_cost + self.h_cost
    }
}

/// Frontier ordering key: `(priority, creation_order)`.
///
/// Lower priority first; equal priorities pop in creation order, which keeps
/// priority frontiers stable (FIFO among ties).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub priority: Cost,
    pub creation_order: u64,
}

/// Walk parent links from `goal_id` back to the root and return the actions
/// in root-to-goal order.
///
/// An out-of-range `goal_id` yields an empty path.
#[must_use]
pub fn reconstruct_path<S, A: Clone>(nodes: &[SearchNode<S, A>], goal_id: usize) -> Vec<A> {
    let mut actions = Vec::new();
    let mut cursor = nodes.get(goal_id);
    while let Some(node) = cursor {
        if let Some(action) = &node.producing_action {
            actions.push(action.clone());
        }
        cursor = node.parent_id.and_then(|id| nodes.get(id));
    }
    actions.reverse();
    actions
}
