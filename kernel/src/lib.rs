//! Athena Kernel: primitives shared by the search, CSP and game crates.
//!
//! # API Surface
//!
//! - [`cost::Cost`]: totally ordered path cost / priority value
//! - [`proof::canon::canonical_json_bytes`]: the single JSON canonicalizer
//! - [`proof::hash::canonical_hash`]: domain-separated SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `cost` and `proof` are independent of each other. The kernel depends on no
//! other workspace member; every algorithm crate depends on the kernel.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cost;
pub mod proof;
