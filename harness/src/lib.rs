//! Athena harness: loads worlds from text, runs the search, CSP and game
//! algorithms against them, and persists canonical result maps.
//!
//! The harness contains no algorithm logic. Worlds supply domain data and
//! the algorithm crates do the work; the harness owns orchestration and
//! persistence.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod results;
pub mod runner;
pub mod worlds;
