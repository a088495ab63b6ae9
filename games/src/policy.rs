//! Depth cutoff and algorithm selection.

use std::str::FromStr;

use crate::error::GameSearchError;

/// How many plies a tree search may look ahead. Every agent's move is one
/// ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthLimit {
    /// Expand until terminal states.
    #[default]
    Unbounded,
    Plies(u32),
}

impl DepthLimit {
    /// Map the external integer contract: `-1` is unbounded, `n >= 0` is
    /// `n` plies.
    ///
    /// # Errors
    ///
    /// Returns [`GameSearchError::InvalidDepth`] for anything below `-1`.
    pub fn from_raw(raw: i64) -> Result<Self, GameSearchError> {
        match raw {
            -1 => Ok(Self::Unbounded),
            n => u32::try_from(n)
                .map(Self::Plies)
                .map_err(|_| GameSearchError::InvalidDepth { raw }),
        }
    }

    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Unbounded => -1,
            Self::Plies(n) => i64::from(n),
        }
    }

    /// No plies left: the current state is evaluated heuristically.
    #[must_use]
    pub fn is_cutoff(self) -> bool {
        self == Self::Plies(0)
    }

    /// The limit one ply deeper.
    #[must_use]
    pub fn descend(self) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::Plies(n) => Self::Plies(n.saturating_sub(1)),
        }
    }
}

/// Which tree search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSearchKind {
    /// One ply, successors scored by the heuristic.
    Greedy,
    Minimax,
    AlphaBeta,
    /// Alpha-beta with successors sorted by heuristic before recursion.
    AlphaBetaOrdered,
    /// Agents other than 0 are chance nodes.
    Expectimax,
}

impl GameSearchKind {
    pub const ALL: [GameSearchKind; 5] = [
        Self::Greedy,
        Self::Minimax,
        Self::AlphaBeta,
        Self::AlphaBetaOrdered,
        Self::Expectimax,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Minimax => "minimax",
            Self::AlphaBeta => "alphabeta",
            Self::AlphaBetaOrdered => "alphabeta_ordered",
            Self::Expectimax => "expectimax",
        }
    }
}

impl FromStr for GameSearchKind {
    type Err = GameSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "minimax" => Ok(Self::Minimax),
            "alphabeta" | "alpha_beta" => Ok(Self::AlphaBeta),
            "alphabeta_ordered" | "alphabeta_with_move_ordering" => Ok(Self::AlphaBetaOrdered),
            "expectimax" => Ok(Self::Expectimax),
            _ => Err(GameSearchError::UnknownKind {
                name: s.to_string(),
            }),
        }
    }
}
