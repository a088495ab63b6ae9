//! `GraphProblem`: an explicit weighted graph described line by line.
//!
//! ```text
//! # comment
//! start A
//! goal D
//! edge A B 1      # undirected
//! arc B D 2.5     # directed
//! h A 2
//! ```
//!
//! Edge costs default to 1. States without an `h` line estimate 0.

use std::collections::{BTreeMap, BTreeSet};

use athena_search::contract::Problem;

use crate::contract::{WorldParseError, WorldSource};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphProblem {
    pub start: String,
    pub goals: BTreeSet<String>,
    /// Outgoing edges per node, in declaration order.
    pub adjacency: BTreeMap<String, Vec<(String, f64)>>,
    pub heuristic: BTreeMap<String, f64>,
}

impl GraphProblem {
    /// Add a directed edge, keeping the cheaper cost on duplicates.
    pub fn add_arc(&mut self, from: &str, to: &str, cost: f64) {
        let out = self.adjacency.entry(from.to_string()).or_default();
        match out.iter_mut().find(|(target, _)| target == to) {
            Some(existing) => existing.1 = existing.1.min(cost),
            None => out.push((to.to_string(), cost)),
        }
    }

    pub fn add_edge(&mut self, a: &str, b: &str, cost: f64) {
        self.add_arc(a, b, cost);
        self.add_arc(b, a, cost);
    }

    /// Table lookup; unknown states estimate 0.
    #[must_use]
    pub fn estimate(&self, state: &str) -> f64 {
        self.heuristic.get(state).copied().unwrap_or(0.0)
    }

    fn edge_cost(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|(target, _)| target == to)
            .map(|(_, cost)| *cost)
    }
}

/// Heuristic adapter for [`athena_search::search::search`].
#[allow(clippy::ptr_arg)]
pub fn graph_heuristic(problem: &GraphProblem, state: &String) -> f64 {
    problem.estimate(state)
}

impl Problem for GraphProblem {
    type State = String;
    /// The node to move to.
    type Action = String;

    fn initial_state(&self) -> String {
        self.start.clone()
    }

    fn is_goal(&self, state: &String) -> bool {
        self.goals.contains(state)
    }

    fn actions(&self, state: &String) -> Vec<String> {
        self.adjacency
            .get(state)
            .map(|out| out.iter().map(|(target, _)| target.clone()).collect())
            .unwrap_or_default()
    }

    fn successor(&self, _state: &String, action: &String) -> String {
        action.clone()
    }

    fn cost(&self, state: &String, action: &String) -> f64 {
        self.edge_cost(state, action).unwrap_or(f64::INFINITY)
    }
}

impl WorldSource for GraphProblem {
    const WORLD_ID: &'static str = "graph";

    fn from_text(text: &str) -> Result<Self, WorldParseError> {
        let mut problem = GraphProblem::default();
        let mut start = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let syntax = |detail: String| WorldParseError::Syntax {
                line: line_no,
                detail,
            };
            let line = raw.split('#').next().unwrap_or_default().trim();
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [] => {}
                ["start", node] => {
                    if start.replace((*node).to_string()).is_some() {
                        return Err(syntax("start declared twice".into()));
                    }
                }
                ["goal", nodes @ ..] if !nodes.is_empty() => {
                    problem.goals.extend(nodes.iter().map(|n| (*n).to_string()));
                }
                [kind @ ("edge" | "arc"), a, b, rest @ ..] if rest.len() <= 1 => {
                    let cost = match rest.first() {
                        Some(raw) => parse_number(raw).map_err(&syntax)?,
                        None => 1.0,
                    };
                    if cost < 0.0 {
                        return Err(syntax(format!("negative cost {cost}")));
                    }
                    if *kind == "edge" {
                        problem.add_edge(a, b, cost);
                    } else {
                        problem.add_arc(a, b, cost);
                    }
                }
                ["h", node, value] => {
                    let value = parse_number(value).map_err(&syntax)?;
                    problem.heuristic.insert((*node).to_string(), value);
                }
                _ => return Err(syntax(format!("unrecognized line {line:?}"))),
            }
        }

        problem.start = start.ok_or_else(|| WorldParseError::Invalid {
            detail: "missing start".into(),
        })?;
        if problem.goals.is_empty() {
            return Err(WorldParseError::Invalid {
                detail: "missing goal".into(),
            });
        }
        Ok(problem)
    }
}

fn parse_number(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("expected a finite number, got {raw:?}")),
    }
}
