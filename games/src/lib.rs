//! Athena Games: adversarial and stochastic game-tree search.
//!
//! Agent 0 is the maximizer. Every other agent either minimizes agent 0's
//! payoff (minimax, alpha-beta) or moves uniformly at random (expectimax).
//!
//! # Key types
//!
//! - [`Game`](contract::Game): capability set a game must expose
//! - [`DepthLimit`](policy::DepthLimit): ply cutoff, or unbounded
//! - [`GameSearchKind`](policy::GameSearchKind): algorithm selector
//! - [`Decision`](report::Decision): tree value, recommended action, counters

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod policy;
pub mod report;
pub mod search;
