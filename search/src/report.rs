//! `SearchReport`: the audit record every search run produces.

use athena_kernel::proof::canon::{canonical_json_bytes, CanonError};
use athena_kernel::proof::hash::{canonical_hash, ContentHash};
use athena_kernel::proof::hash_domain::HashDomain;

use crate::policy::Algorithm;

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A goal state was found at `node_id`.
    GoalReached { node_id: u64 },
    /// The frontier emptied without reaching a goal: there is no solution.
    FrontierExhausted,
    /// The policy's expansion budget ran out before a goal was found.
    ExpansionBudgetExceeded,
}

/// Aggregate counters for one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub termination: TerminationReason,
    /// States popped from the frontier and expanded.
    pub total_expansions: u64,
    /// Calls to `Problem::is_goal`.
    pub total_goal_tests: u64,
    /// Successor states generated.
    pub total_generated: u64,
    /// Successors discarded because their state was explored or queued.
    pub total_duplicates_suppressed: u64,
    pub frontier_high_water: u64,
    /// Summed action cost of the returned path.
    pub solution_cost: Option<f64>,
    /// Number of actions in the returned path.
    pub solution_length: Option<usize>,
}

impl SearchReport {
    /// JSON form with stable field names.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "algorithm": self.algorithm.as_str(),
            "frontier_high_water": self.frontier_high_water,
            "solution_cost": self.solution_cost,
            "solution_length": self.solution_length,
            "termination": termination_to_json(self.termination),
            "total_duplicates_suppressed": self.total_duplicates_suppressed,
            "total_expansions": self.total_expansions,
            "total_generated": self.total_generated,
            "total_goal_tests": self.total_goal_tests,
        })
    }

    /// Canonical JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the solution cost is not finite.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchReport, &bytes))
    }
}

fn termination_to_json(reason: TerminationReason) -> serde_json::Value {
    match reason {
        TerminationReason::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "goal_reached"})
        }
        TerminationReason::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReason::ExpansionBudgetExceeded => {
            serde_json::json!({"type": "expansion_budget_exceeded"})
        }
    }
}
