//! `Decision` and `TreeStats`: what a tree search returns.

use athena_kernel::proof::canon::{canonical_json_bytes, CanonError};
use athena_kernel::proof::hash::{canonical_hash, ContentHash};
use athena_kernel::proof::hash_domain::HashDomain;

/// Node counters for one tree search. Pruning shows up here; it never
/// changes the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// States entered by the recursion, root included.
    pub nodes_visited: u64,
    /// Terminal states and depth-cutoff states scored.
    pub leaves_evaluated: u64,
    /// Alpha-beta breaks that skipped at least one sibling.
    pub cutoffs: u64,
}

impl TreeStats {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cutoffs": self.cutoffs,
            "leaves_evaluated": self.leaves_evaluated,
            "nodes_visited": self.nodes_visited,
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::TreeStats, &bytes))
    }
}

/// Tree value and recommended action at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    /// Value of the root from agent 0's perspective.
    pub value: f64,
    /// `None` at terminal or cutoff roots.
    pub action: Option<A>,
    pub stats: TreeStats,
}
