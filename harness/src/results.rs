//! Results persistence: write/read a results mapping to/from disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   results.json          canonical JSON object, case name -> run record
//!   results_digest.txt    ASCII digest string ("sha256:...")
//! ```
//!
//! The digest is `canonical_hash(Results, results.json bytes)`. The
//! directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing file: error
//! - Invalid JSON, or a top level that is not an object: error
//! - Non-canonical `results.json`: error
//! - Malformed or mismatched digest: error

use std::collections::BTreeMap;
use std::path::Path;

use athena_kernel::proof::canon::{canonical_json_bytes, CanonError};
use athena_kernel::proof::hash::{canonical_hash, ContentHash};
use athena_kernel::proof::hash_domain::HashDomain;

/// Case name to run record.
pub type ResultsMap = BTreeMap<String, serde_json::Value>;

pub const RESULTS_FILENAME: &str = "results.json";
pub const DIGEST_FILENAME: &str = "results_digest.txt";

/// Error writing a results directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsWriteError {
    Io { detail: String },
    Canon { detail: String },
}

impl std::fmt::Display for ResultsWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Canon { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ResultsWriteError {}

/// Error reading a results directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsReadError {
    /// A required file is missing or unreadable.
    MissingFile { filename: String },
    /// `results.json` is not valid JSON.
    Parse { detail: String },
    /// `results.json` is valid JSON but not an object.
    NotAnObject,
    /// `results.json` is not in canonical form.
    NonCanonical,
    /// `results_digest.txt` is not a `sha256:<64 hex>` string.
    MalformedDigest { stored: String },
    /// `results_digest.txt` does not match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ResultsReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile { filename } => write!(f, "missing results file: {filename}"),
            Self::Parse { detail } => write!(f, "results parse error: {detail}"),
            Self::NotAnObject => write!(f, "results must be a JSON object"),
            Self::NonCanonical => write!(f, "results.json is not canonical JSON"),
            Self::MalformedDigest { stored } => write!(f, "malformed digest: {stored:?}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for ResultsReadError {}

/// Canonical bytes of a results mapping.
///
/// # Errors
///
/// Returns [`CanonError`] if any record contains a non-finite number.
pub fn results_bytes(results: &ResultsMap) -> Result<Vec<u8>, CanonError> {
    let object: serde_json::Map<String, serde_json::Value> = results
        .iter()
        .map(|(name, record)| (name.clone(), record.clone()))
        .collect();
    canonical_json_bytes(&serde_json::Value::Object(object))
}

/// Digest of a results mapping, as stored in `results_digest.txt`.
///
/// # Errors
///
/// Returns [`CanonError`] if canonicalization fails.
pub fn results_digest(results: &ResultsMap) -> Result<ContentHash, CanonError> {
    Ok(canonical_hash(HashDomain::Results, &results_bytes(results)?))
}

/// Write `results` to `dir`, creating it if needed. Returns the digest.
///
/// # Errors
///
/// Returns [`ResultsWriteError`] on I/O failure or canonical JSON error.
pub fn write_results(results: &ResultsMap, dir: &Path) -> Result<ContentHash, ResultsWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ResultsWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let bytes = results_bytes(results).map_err(|e| ResultsWriteError::Canon {
        detail: e.to_string(),
    })?;
    let digest = canonical_hash(HashDomain::Results, &bytes);

    write_atomic(&dir.join(RESULTS_FILENAME), &bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;
    Ok(digest)
}

/// Read and verify a results directory written by [`write_results`].
///
/// # Errors
///
/// Returns [`ResultsReadError`] on any validation failure.
pub fn read_results(dir: &Path) -> Result<ResultsMap, ResultsReadError> {
    let bytes = read_required(dir, RESULTS_FILENAME)?;
    let stored = read_required(dir, DIGEST_FILENAME)?;

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ResultsReadError::Parse {
            detail: e.to_string(),
        })?;
    let serde_json::Value::Object(object) = value else {
        return Err(ResultsReadError::NotAnObject);
    };
    let results: ResultsMap = object.into_iter().collect();

    let recanonical = results_bytes(&results).map_err(|_| ResultsReadError::NonCanonical)?;
    if recanonical != bytes {
        return Err(ResultsReadError::NonCanonical);
    }

    let stored = String::from_utf8_lossy(&stored).trim().to_string();
    if !is_sha256_digest(&stored) {
        return Err(ResultsReadError::MalformedDigest { stored });
    }
    let recomputed = canonical_hash(HashDomain::Results, &bytes);
    if recomputed.as_str() != stored {
        return Err(ResultsReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(results)
}

fn is_sha256_digest(stored: &str) -> bool {
    ContentHash::parse(stored).is_some_and(|hash| {
        hash.algorithm() == "sha256"
            && hex::decode(hash.hex_digest()).is_ok_and(|raw| raw.len() == 32)
    })
}

/// Write bytes to a path via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ResultsWriteError> {
    let dir = path.parent().ok_or_else(|| ResultsWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    std::fs::write(&temp_path, content).map_err(|e| ResultsWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ResultsWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ResultsReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ResultsReadError::MissingFile {
        filename: filename.to_string(),
    })
}
