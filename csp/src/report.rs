//! `SolveReport`: counters for one backtracking run.

use athena_kernel::proof::canon::{canonical_json_bytes, CanonError};
use athena_kernel::proof::hash::{canonical_hash, ContentHash};
use athena_kernel::proof::hash_domain::HashDomain;

/// Aggregate counters for one `solve` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveReport {
    /// Assignment nodes checked for completeness (the empty root included,
    /// forward-checking failures excluded).
    pub completeness_checks: u64,
    /// Candidate values tentatively assigned.
    pub assignments_tried: u64,
    /// Tentative assignments rejected because forward checking emptied a
    /// domain.
    pub forward_check_failures: u64,
    /// 1-consistency proved the problem unsolvable before any search.
    pub one_consistency_failed: bool,
}

impl SolveReport {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "assignments_tried": self.assignments_tried,
            "completeness_checks": self.completeness_checks,
            "forward_check_failures": self.forward_check_failures,
            "one_consistency_failed": self.one_consistency_failed,
        })
    }

    /// # Errors
    ///
    /// Never fails in practice (no floats); the signature matches the other
    /// reports.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SolveReport, &bytes))
    }
}
