//! `TreeGame`: an explicit game tree loaded from JSON.
//!
//! ```json
//! {"turn": 0, "heuristic": 1.5, "children": {
//!     "left":  {"turn": 1, "children": {"a": {"values": [3, -3]}, "b": {"values": [5, -5]}}},
//!     "right": {"values": [1, -1]}
//! }}
//! ```
//!
//! A node is terminal (`values`, one utility per agent) or a decision node
//! (`turn` and `children`). `heuristic` is optional on any node and scores
//! it for the agent to move; it defaults to 0. Actions are the child keys
//! in sorted order.

use std::collections::BTreeMap;

use serde::Deserialize;

use athena_games::contract::Game;

use crate::contract::{WorldParseError, WorldSource};

#[derive(Debug, Deserialize)]
struct RawNode {
    turn: Option<usize>,
    children: Option<BTreeMap<String, RawNode>>,
    values: Option<Vec<f64>>,
    heuristic: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Terminal(Vec<f64>),
    Decision {
        turn: usize,
        children: Vec<(String, usize)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct TreeNode {
    kind: NodeKind,
    heuristic: f64,
}

/// Arena of nodes; node 0 is the root. States are node indices.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeGame {
    nodes: Vec<TreeNode>,
}

impl TreeGame {
    pub const ROOT: usize = 0;

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Stored heuristic of `state`; 0 when absent.
    #[must_use]
    pub fn estimate(&self, state: usize) -> f64 {
        self.nodes.get(state).map_or(0.0, |node| node.heuristic)
    }

    fn flatten(&mut self, raw: RawNode, path: &str) -> Result<usize, WorldParseError> {
        let invalid = |detail: &str| WorldParseError::Invalid {
            detail: format!("node {path:?}: {detail}"),
        };
        let index = self.nodes.len();
        let heuristic = raw.heuristic.unwrap_or(0.0);
        match (raw.values, raw.turn, raw.children) {
            (Some(values), None, None) => {
                if values.is_empty() {
                    return Err(invalid("terminal values must not be empty"));
                }
                self.nodes.push(TreeNode {
                    kind: NodeKind::Terminal(values),
                    heuristic,
                });
            }
            (None, Some(turn), children) => {
                self.nodes.push(TreeNode {
                    kind: NodeKind::Decision {
                        turn,
                        children: Vec::new(),
                    },
                    heuristic,
                });
                let mut linked = Vec::new();
                for (action, child) in children.unwrap_or_default() {
                    let child_path = format!("{path}/{action}");
                    let child_index = self.flatten(child, &child_path)?;
                    linked.push((action, child_index));
                }
                if let NodeKind::Decision { children, .. } = &mut self.nodes[index].kind {
                    *children = linked;
                }
            }
            (Some(_), _, _) => return Err(invalid("terminal nodes take no turn or children")),
            (None, None, _) => return Err(invalid("expected \"values\" or \"turn\"")),
        }
        Ok(index)
    }
}

/// Heuristic adapter for the game searches: the node's stored estimate.
pub fn tree_heuristic(game: &TreeGame, state: &usize, _agent: usize) -> f64 {
    game.estimate(*state)
}

impl Game for TreeGame {
    type State = usize;
    /// Child key.
    type Action = String;

    fn turn(&self, state: &usize) -> usize {
        match self.nodes.get(*state).map(|node| &node.kind) {
            Some(NodeKind::Decision { turn, .. }) => *turn,
            _ => 0,
        }
    }

    fn is_terminal(&self, state: &usize) -> Option<Vec<f64>> {
        match self.nodes.get(*state).map(|node| &node.kind) {
            Some(NodeKind::Terminal(values)) => Some(values.clone()),
            _ => None,
        }
    }

    fn actions(&self, state: &usize) -> Vec<String> {
        match self.nodes.get(*state).map(|node| &node.kind) {
            Some(NodeKind::Decision { children, .. }) => {
                children.iter().map(|(action, _)| action.clone()).collect()
            }
            _ => Vec::new(),
        }
    }

    fn successor(&self, state: &usize, action: &String) -> usize {
        match self.nodes.get(*state).map(|node| &node.kind) {
            Some(NodeKind::Decision { children, .. }) => children
                .iter()
                .find(|(name, _)| name == action)
                .map_or(*state, |(_, child)| *child),
            _ => *state,
        }
    }
}

impl WorldSource for TreeGame {
    const WORLD_ID: &'static str = "tree_game";

    fn from_text(text: &str) -> Result<Self, WorldParseError> {
        let raw: RawNode = serde_json::from_str(text).map_err(|e| WorldParseError::Json {
            detail: e.to_string(),
        })?;
        let mut game = TreeGame { nodes: Vec::new() };
        game.flatten(raw, "")?;
        Ok(game)
    }
}
