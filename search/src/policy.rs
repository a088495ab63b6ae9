//! Search policy types.

use std::str::FromStr;

use crate::error::SearchError;

/// Which graph search algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// FIFO frontier, goal test on generation.
    BreadthFirst,
    /// LIFO frontier, goal test on expansion.
    DepthFirst,
    /// Frontier ordered by accumulated path cost `g`.
    UniformCost,
    /// Frontier ordered by `g + h`.
    AStar,
    /// Frontier ordered by `h` alone (greedy).
    BestFirst,
}

impl Algorithm {
    /// Every algorithm, in a fixed order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::UniformCost,
        Algorithm::AStar,
        Algorithm::BestFirst,
    ];

    /// Stable short name used in reports and by the harness.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
            Self::UniformCost => "ucs",
            Self::AStar => "astar",
            Self::BestFirst => "best_first",
        }
    }

    /// Whether the algorithm consults the heuristic.
    #[must_use]
    pub fn is_informed(self) -> bool {
        matches!(self, Self::AStar | Self::BestFirst)
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first" => Ok(Self::BreadthFirst),
            "dfs" | "depth_first" => Ok(Self::DepthFirst),
            "ucs" | "uniform_cost" => Ok(Self::UniformCost),
            "astar" | "a*" | "a_star" => Ok(Self::AStar),
            "best_first" | "greedy" => Ok(Self::BestFirst),
            _ => Err(SearchError::UnknownAlgorithm { name: s.to_string() }),
        }
    }
}

/// Search budget configuration.
///
/// The default policy is unbounded: the search runs until it reaches a goal
/// or exhausts the reachable state space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    /// Hard cap on node expansions. `None` means unbounded.
    pub max_expansions: Option<u64>,
}

impl SearchPolicy {
    /// A policy that stops after `max_expansions` expansions.
    #[must_use]
    pub fn with_max_expansions(max_expansions: u64) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }

    /// Validate that the policy can drive a search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget,
    /// which could never expand the initial state.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Whether `expansions` has reached the budget.
    #[must_use]
    pub fn is_exhausted(&self, expansions: u64) -> bool {
        self.max_expansions.is_some_and(|max| expansions >= max)
    }
}
