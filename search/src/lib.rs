//! Athena Search: uninformed and informed graph search over an implicit
//! state space.
//!
//! # Crate dependency graph
//!
//! ```text
//! athena_kernel  ←  athena_search  ←  athena_harness
//! (cost, proof)     (frontier, nodes)   (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`Problem`](contract::Problem): capability set a state space must expose
//! - [`SearchNode`](node::SearchNode): arena node with parent link and costs
//! - [`SearchFrontier`](frontier::SearchFrontier): FIFO, LIFO or priority frontier
//! - [`SearchPolicy`](policy::SearchPolicy): expansion budget
//! - [`SearchReport`](report::SearchReport): per-run audit record
//!
//! The entry point is [`search::search`]; the per-algorithm functions
//! ([`search::breadth_first_search`] and friends) return just the action path.

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;
