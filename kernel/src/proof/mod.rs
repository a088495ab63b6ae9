//! Proof module: canonical JSON serialization and content hashing.
//!
//! Reports and persisted result mappings are hashed through here so that a
//! digest computed on one machine verifies on another.

pub mod canon;
pub mod hash;
pub mod hash_domain;
